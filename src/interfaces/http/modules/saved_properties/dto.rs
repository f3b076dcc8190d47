//! Saved property DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::saved_property::SavedProperty;
use crate::interfaces::http::modules::properties::PropertyResponse;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SavedPropertyResponse {
    pub id: String,
    pub property_id: String,
    pub created_at: DateTime<Utc>,
    /// The bookmarked listing, when it still exists
    pub property: Option<PropertyResponse>,
}

impl SavedPropertyResponse {
    pub fn from_parts(
        saved: SavedProperty,
        property: Option<crate::domain::Property>,
    ) -> Self {
        Self {
            id: saved.id,
            property_id: saved.property_id,
            created_at: saved.created_at,
            property: property.map(Into::into),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SavePropertyRequest {
    #[validate(length(min = 1, message = "property_id is required"))]
    pub property_id: String,
}
