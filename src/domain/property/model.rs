//! Property domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Days used to derive a nightly rate from the monthly price.
const NIGHTS_PER_MONTH: i64 = 30;

/// Rental listing owned by a landlord.
#[derive(Debug, Clone)]
pub struct Property {
    /// Unique property ID
    pub id: String,
    /// Owning landlord profile
    pub landlord_id: String,
    pub title: String,
    pub description: Option<String>,
    pub address: String,
    pub city: String,
    /// Base monthly price
    pub price_per_month: Decimal,
    pub bedrooms: i32,
    pub bathrooms: i32,
    /// Cached mean of all review ratings; 0.0 when unreviewed
    pub average_rating: f64,
    /// Cached review count
    pub total_reviews: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        landlord_id: impl Into<String>,
        title: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        price_per_month: Decimal,
        bedrooms: i32,
        bathrooms: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            landlord_id: landlord_id.into(),
            title: title.into(),
            description: None,
            address: address.into(),
            city: city.into(),
            price_per_month,
            bedrooms,
            bathrooms,
            average_rating: 0.0,
            total_reviews: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Nightly rate derived from the monthly price
    pub fn nightly_rate(&self) -> Decimal {
        (self.price_per_month / Decimal::from(NIGHTS_PER_MONTH)).round_dp(2)
    }

    /// Total price for a stay of `nights`, using `nightly_override` when a
    /// covering availability window sets one.
    pub fn quote_stay(&self, nights: i64, nightly_override: Option<Decimal>) -> Decimal {
        let rate = nightly_override.unwrap_or_else(|| self.nightly_rate());
        (rate * Decimal::from(nights)).round_dp(2)
    }

    pub fn is_owned_by(&self, landlord_id: &str) -> bool {
        self.landlord_id == landlord_id
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_property() -> Property {
        Property::new(
            "prop-1",
            "ll-1",
            "Sunny two-bed flat",
            "12 Elm Street",
            "Gothenburg",
            Decimal::new(1500000, 2), // 15000.00
            2,
            1,
        )
    }

    #[test]
    fn nightly_rate_is_monthly_over_thirty() {
        let p = sample_property();
        assert_eq!(p.nightly_rate(), Decimal::new(50000, 2)); // 500.00
    }

    #[test]
    fn quote_uses_override_when_present() {
        let p = sample_property();
        assert_eq!(p.quote_stay(7, None), Decimal::new(350000, 2)); // 3500.00
        assert_eq!(
            p.quote_stay(7, Some(Decimal::new(40000, 2))),
            Decimal::new(280000, 2) // 2800.00
        );
    }

    #[test]
    fn quote_preserves_two_decimal_places() {
        let p = Property::new(
            "prop-2",
            "ll-1",
            "Studio",
            "1 Side St",
            "Malmo",
            Decimal::new(1000000, 2), // 10000.00 -> 333.33/night
            1,
            1,
        );
        assert_eq!(p.nightly_rate(), Decimal::new(33333, 2));
        assert_eq!(p.quote_stay(3, None), Decimal::new(99999, 2));
    }

    #[test]
    fn ownership_check_compares_landlord_profile_id() {
        let p = sample_property();
        assert!(p.is_owned_by("ll-1"));
        assert!(!p.is_owned_by("user-id-of-ll-1"));
    }

    #[test]
    fn new_property_has_no_reviews() {
        let p = sample_property();
        assert_eq!(p.average_rating, 0.0);
        assert_eq!(p.total_reviews, 0);
    }
}
