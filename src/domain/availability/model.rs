//! Availability window domain entity

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::domain::booking::ranges_overlap;
use crate::domain::{DomainError, DomainResult};

/// Landlord-declared date range marking a property open or blocked,
/// optionally overriding the property's price for that range.
#[derive(Debug, Clone)]
pub struct AvailabilityWindow {
    /// Unique window ID
    pub id: String,
    /// Owning property
    pub property_id: String,
    /// Inclusive range start
    pub start_date: NaiveDate,
    /// Inclusive range end
    pub end_date: NaiveDate,
    /// false marks the range as blocked for booking
    pub is_available: bool,
    /// Nightly price override for this range
    pub price_override: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial-update value for `price_override`.
///
/// Distinguishes "field omitted" from "explicitly set to null": a PATCH that
/// omits the field keeps the stored value, while an explicit null clears it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PriceOverrideUpdate {
    #[default]
    Keep,
    Clear,
    Set(Decimal),
}

impl AvailabilityWindow {
    pub fn new(
        id: impl Into<String>,
        property_id: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        is_available: bool,
        price_override: Option<Decimal>,
    ) -> DomainResult<Self> {
        validate_range(start_date, end_date)?;
        if let Some(price) = price_override {
            validate_price_override(price)?;
        }
        let now = Utc::now();
        Ok(Self {
            id: id.into(),
            property_id: property_id.into(),
            start_date,
            end_date,
            is_available,
            price_override,
            created_at: now,
            updated_at: now,
        })
    }

    /// Whether this window intersects the half-open range [check_in, check_out).
    ///
    /// The window's inclusive end day still counts as available lodging, so
    /// the window is treated as the half-open range [start, end + 1 day).
    pub fn overlaps_stay(&self, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        let window_end_exclusive = self.end_date + chrono::Days::new(1);
        ranges_overlap(self.start_date, window_end_exclusive, check_in, check_out)
    }

    /// Whether the whole stay [check_in, check_out) falls inside this window
    pub fn covers_stay(&self, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        let window_end_exclusive = self.end_date + chrono::Days::new(1);
        self.start_date <= check_in && check_out <= window_end_exclusive
    }

    /// Apply a partial update, re-validating the resulting range.
    pub fn apply_update(
        &mut self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        is_available: Option<bool>,
        price_override: PriceOverrideUpdate,
    ) -> DomainResult<()> {
        let start = start_date.unwrap_or(self.start_date);
        let end = end_date.unwrap_or(self.end_date);
        validate_range(start, end)?;

        match price_override {
            PriceOverrideUpdate::Keep => {}
            PriceOverrideUpdate::Clear => self.price_override = None,
            PriceOverrideUpdate::Set(price) => {
                validate_price_override(price)?;
                self.price_override = Some(price);
            }
        }

        self.start_date = start;
        self.end_date = end;
        if let Some(available) = is_available {
            self.is_available = available;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

pub fn validate_range(start: NaiveDate, end: NaiveDate) -> DomainResult<()> {
    if start > end {
        return Err(DomainError::Validation(
            "start_date must not be after end_date".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_price_override(price: Decimal) -> DomainResult<()> {
    if price.is_sign_negative() {
        return Err(DomainError::Validation(
            "price_override must be a non-negative amount".to_string(),
        ));
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_window() -> AvailabilityWindow {
        AvailabilityWindow::new(
            "w-1",
            "prop-1",
            d("2026-03-01"),
            d("2026-03-31"),
            true,
            None,
        )
        .unwrap()
    }

    #[test]
    fn rejects_inverted_range() {
        let err = AvailabilityWindow::new(
            "w-1",
            "prop-1",
            d("2026-03-31"),
            d("2026-03-01"),
            true,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn single_day_window_is_valid() {
        let w = AvailabilityWindow::new(
            "w-1",
            "prop-1",
            d("2026-03-01"),
            d("2026-03-01"),
            false,
            None,
        )
        .unwrap();
        assert_eq!(w.start_date, w.end_date);
    }

    #[test]
    fn rejects_negative_price_override() {
        let err = AvailabilityWindow::new(
            "w-1",
            "prop-1",
            d("2026-03-01"),
            d("2026-03-31"),
            true,
            Some(Decimal::new(-100, 2)),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn overlap_includes_the_end_day() {
        let w = sample_window();
        // stay starting on the window's last day
        assert!(w.overlaps_stay(d("2026-03-31"), d("2026-04-02")));
        // stay starting the day after
        assert!(!w.overlaps_stay(d("2026-04-01"), d("2026-04-05")));
    }

    #[test]
    fn covers_whole_stay() {
        let w = sample_window();
        assert!(w.covers_stay(d("2026-03-10"), d("2026-03-15")));
        // checkout on the day after the window end is still covered
        assert!(w.covers_stay(d("2026-03-25"), d("2026-04-01")));
        assert!(!w.covers_stay(d("2026-02-27"), d("2026-03-05")));
    }

    #[test]
    fn partial_update_keeps_omitted_fields() {
        let mut w = sample_window();
        w.apply_update(None, Some(d("2026-04-15")), None, PriceOverrideUpdate::Keep)
            .unwrap();
        assert_eq!(w.start_date, d("2026-03-01"));
        assert_eq!(w.end_date, d("2026-04-15"));
        assert!(w.is_available);
        assert_eq!(w.price_override, None);
    }

    #[test]
    fn partial_update_rejects_inverted_result() {
        let mut w = sample_window();
        let err = w
            .apply_update(
                Some(d("2026-05-01")),
                None,
                None,
                PriceOverrideUpdate::Keep,
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        // window unchanged on failure
        assert_eq!(w.start_date, d("2026-03-01"));
    }

    #[test]
    fn price_override_tristate() {
        let mut w = sample_window();

        w.apply_update(
            None,
            None,
            None,
            PriceOverrideUpdate::Set(Decimal::new(12550, 2)),
        )
        .unwrap();
        assert_eq!(w.price_override, Some(Decimal::new(12550, 2)));

        // Keep leaves the stored value alone
        w.apply_update(None, None, Some(false), PriceOverrideUpdate::Keep)
            .unwrap();
        assert_eq!(w.price_override, Some(Decimal::new(12550, 2)));
        assert!(!w.is_available);

        // Clear removes it
        w.apply_update(None, None, None, PriceOverrideUpdate::Clear)
            .unwrap();
        assert_eq!(w.price_override, None);
    }
}
