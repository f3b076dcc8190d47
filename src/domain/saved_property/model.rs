//! Saved property domain entity

use chrono::{DateTime, Utc};

/// A tenant's bookmark of a property. Unique per (tenant, property).
#[derive(Debug, Clone)]
pub struct SavedProperty {
    pub id: String,
    pub tenant_id: String,
    pub property_id: String,
    pub created_at: DateTime<Utc>,
}

impl SavedProperty {
    pub fn new(
        id: impl Into<String>,
        tenant_id: impl Into<String>,
        property_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            tenant_id: tenant_id.into(),
            property_id: property_id.into(),
            created_at: Utc::now(),
        }
    }
}
