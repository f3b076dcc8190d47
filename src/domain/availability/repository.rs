//! Availability window repository interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::AvailabilityWindow;
use crate::domain::DomainResult;

#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    /// Save a new window
    async fn save(&self, window: AvailabilityWindow) -> DomainResult<AvailabilityWindow>;

    /// Find window by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<AvailabilityWindow>>;

    /// All windows for a property, ordered by start date ascending
    async fn find_for_property(&self, property_id: &str) -> DomainResult<Vec<AvailabilityWindow>>;

    /// Windows intersecting the half-open stay range [check_in, check_out)
    async fn find_overlapping(
        &self,
        property_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> DomainResult<Vec<AvailabilityWindow>>;

    /// Persist changes to an existing window
    async fn update(&self, window: AvailabilityWindow) -> DomainResult<AvailabilityWindow>;

    /// Hard delete; `DomainError::NotFound` when the ID does not resolve
    async fn delete(&self, id: &str) -> DomainResult<()>;
}
