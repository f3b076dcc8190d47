//! Review DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::review::{Review, ReviewEligibility};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReviewResponse {
    pub id: String,
    pub property_id: String,
    pub tenant_id: String,
    pub booking_id: String,
    pub rating: i32,
    pub review_text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(r: Review) -> Self {
        Self {
            id: r.id,
            property_id: r.property_id,
            tenant_id: r.tenant_id,
            booking_id: r.booking_id,
            rating: r.rating,
            review_text: r.review_text,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReviewEligibilityResponse {
    pub eligible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<ReviewEligibility> for ReviewEligibilityResponse {
    fn from(e: ReviewEligibility) -> Self {
        Self {
            eligible: e.eligible,
            booking_id: e.booking_id,
            message: e.message,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReviewRequest {
    #[validate(length(min = 1, message = "property_id is required"))]
    pub property_id: String,
    #[validate(length(min = 1, message = "booking_id is required"))]
    pub booking_id: String,
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: i32,
    #[validate(length(max = 5000))]
    pub review_text: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateReviewRequest {
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: i32,
    #[validate(length(max = 5000))]
    pub review_text: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct ReviewListQuery {
    pub property_id: String,
}
