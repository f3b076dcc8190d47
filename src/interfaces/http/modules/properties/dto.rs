//! Property DTOs
//!
//! Monetary fields travel as plain JSON numbers; the internal decimal
//! representation is converted at the boundary keeping 2 decimal places.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Property;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PropertyResponse {
    pub id: String,
    pub landlord_id: String,
    pub title: String,
    pub description: Option<String>,
    pub address: String,
    pub city: String,
    pub price_per_month: f64,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub average_rating: f64,
    pub total_reviews: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Property> for PropertyResponse {
    fn from(p: Property) -> Self {
        Self {
            id: p.id,
            landlord_id: p.landlord_id,
            title: p.title,
            description: p.description,
            address: p.address,
            city: p.city,
            price_per_month: p.price_per_month.to_f64().unwrap_or(0.0),
            bedrooms: p.bedrooms,
            bathrooms: p.bathrooms,
            average_rating: p.average_rating,
            total_reviews: p.total_reviews,
            is_active: p.is_active,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePropertyRequest {
    #[validate(length(min = 1, max = 200, message = "title is required"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 300, message = "address is required"))]
    pub address: String,
    #[validate(length(min = 1, max = 100, message = "city is required"))]
    pub city: String,
    #[validate(range(min = 0.0, message = "price_per_month must be non-negative"))]
    pub price_per_month: f64,
    #[validate(range(min = 0, max = 50))]
    pub bedrooms: i32,
    #[validate(range(min = 0, max = 50))]
    pub bathrooms: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePropertyRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 300))]
    pub address: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub city: Option<String>,
    #[validate(range(min = 0.0))]
    pub price_per_month: Option<f64>,
    #[validate(range(min = 0, max = 50))]
    pub bedrooms: Option<i32>,
    #[validate(range(min = 0, max = 50))]
    pub bathrooms: Option<i32>,
    pub is_active: Option<bool>,
}

/// Search filters for the public listing endpoint
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct PropertyListQuery {
    pub city: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub bedrooms: Option<i32>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    20
}

/// Convert a request money amount to the internal decimal form
pub fn money_from_f64(value: f64, field: &str) -> Result<Decimal, String> {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp(2))
        .ok_or_else(|| format!("{} is not a valid amount", field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_conversion_keeps_two_decimals() {
        let d = money_from_f64(1234.567, "price").unwrap();
        assert_eq!(d, Decimal::new(123457, 2));
        assert!(money_from_f64(f64::NAN, "price").is_err());
    }

    #[test]
    fn response_serializes_money_as_number() {
        let p = Property::new(
            "p-1",
            "ll-1",
            "Flat",
            "1 Main St",
            "Turin",
            Decimal::new(123450, 2),
            1,
            1,
        );
        let json = serde_json::to_value(PropertyResponse::from(p)).unwrap();
        assert_eq!(json["price_per_month"], serde_json::json!(1234.5));
    }
}
