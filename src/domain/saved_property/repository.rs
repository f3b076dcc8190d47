//! Saved property repository interface

use async_trait::async_trait;

use super::model::SavedProperty;
use crate::domain::DomainResult;

#[async_trait]
pub trait SavedPropertyRepository: Send + Sync {
    /// Insert a bookmark. The datastore enforces uniqueness on
    /// (tenant_id, property_id); duplicates surface as `DomainError::Conflict`.
    async fn save(&self, saved: SavedProperty) -> DomainResult<SavedProperty>;

    async fn find(
        &self,
        tenant_id: &str,
        property_id: &str,
    ) -> DomainResult<Option<SavedProperty>>;

    /// All bookmarks of a tenant, newest first
    async fn find_for_tenant(&self, tenant_id: &str) -> DomainResult<Vec<SavedProperty>>;

    /// Remove a bookmark; `DomainError::NotFound` when absent
    async fn delete(&self, tenant_id: &str, property_id: &str) -> DomainResult<()>;
}
