//! Availability window DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::availability::{AvailabilityWindow, PriceOverrideUpdate};
use crate::interfaces::http::modules::properties::money_from_f64;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityWindowResponse {
    pub id: String,
    pub property_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_available: bool,
    /// Nightly override as a plain number, null when unset
    pub price_override: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AvailabilityWindow> for AvailabilityWindowResponse {
    fn from(w: AvailabilityWindow) -> Self {
        Self {
            id: w.id,
            property_id: w.property_id,
            start_date: w.start_date,
            end_date: w.end_date,
            is_available: w.is_available,
            price_override: w.price_override.and_then(|d| d.to_f64()),
            created_at: w.created_at,
            updated_at: w.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAvailabilityRequest {
    #[validate(length(min = 1, message = "property_id is required"))]
    pub property_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_available: bool,
    #[validate(range(min = 0.0, message = "price_override must be non-negative"))]
    pub price_override: Option<f64>,
}

/// Partial update. `price_override` is tri-state: omitting the field keeps
/// the stored value, an explicit `null` clears it, a number replaces it.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAvailabilityRequest {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_available: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<f64>)]
    pub price_override: Option<Option<f64>>,
}

/// Distinguishes a missing field (outer None) from an explicit null
/// (inner None).
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer).map(Some)
}

impl UpdateAvailabilityRequest {
    pub fn price_override_update(&self) -> Result<PriceOverrideUpdate, String> {
        match self.price_override {
            None => Ok(PriceOverrideUpdate::Keep),
            Some(None) => Ok(PriceOverrideUpdate::Clear),
            Some(Some(value)) => money_from_f64(value, "price_override")
                .map(PriceOverrideUpdate::Set),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct AvailabilityListQuery {
    pub property_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn omitted_price_override_keeps() {
        let req: UpdateAvailabilityRequest =
            serde_json::from_str(r#"{"is_available": false}"#).unwrap();
        assert_eq!(req.price_override_update(), Ok(PriceOverrideUpdate::Keep));
    }

    #[test]
    fn explicit_null_clears() {
        let req: UpdateAvailabilityRequest =
            serde_json::from_str(r#"{"price_override": null}"#).unwrap();
        assert_eq!(req.price_override_update(), Ok(PriceOverrideUpdate::Clear));
    }

    #[test]
    fn number_sets_with_two_decimals() {
        let req: UpdateAvailabilityRequest =
            serde_json::from_str(r#"{"price_override": 420.25}"#).unwrap();
        assert_eq!(
            req.price_override_update(),
            Ok(PriceOverrideUpdate::Set(Decimal::new(42025, 2)))
        );
    }

    #[test]
    fn response_serializes_override_as_number() {
        let w = AvailabilityWindow::new(
            "w-1",
            "p-1",
            NaiveDate::parse_from_str("2026-03-01", "%Y-%m-%d").unwrap(),
            NaiveDate::parse_from_str("2026-03-31", "%Y-%m-%d").unwrap(),
            true,
            Some(Decimal::new(45050, 2)),
        )
        .unwrap();
        let json = serde_json::to_value(AvailabilityWindowResponse::from(w)).unwrap();
        assert_eq!(json["price_override"], serde_json::json!(450.5));
        assert_eq!(json["start_date"], serde_json::json!("2026-03-01"));
    }
}
