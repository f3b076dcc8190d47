//! Booking DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Booking;
use crate::interfaces::http::modules::availability::AvailabilityWindowResponse;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingResponse {
    pub id: String,
    pub property_id: String,
    pub tenant_id: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub status: String,
    /// Total stay price as a plain number
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            property_id: b.property_id,
            tenant_id: b.tenant_id,
            check_in_date: b.check_in_date,
            check_out_date: b.check_out_date,
            status: b.status.as_str().to_string(),
            total_price: b.total_price.to_f64().unwrap_or(0.0),
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    #[validate(length(min = 1, message = "property_id is required"))]
    pub property_id: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct AvailabilityCheckQuery {
    pub property_id: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityCheckResponse {
    pub available: bool,
}

/// Declared calendar windows plus date-holding bookings for a property
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PropertyCalendarResponse {
    pub windows: Vec<AvailabilityWindowResponse>,
    pub bookings: Vec<BookingResponse>,
}
