//! Review repository interface

use async_trait::async_trait;

use super::model::Review;
use crate::domain::DomainResult;

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Insert a new review. The datastore enforces a unique constraint on
    /// `booking_id`; a duplicate insert surfaces as `DomainError::Conflict`.
    async fn save(&self, review: Review) -> DomainResult<Review>;

    /// Find review by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Review>>;

    /// Find the review attached to a booking, if any
    async fn find_by_booking_id(&self, booking_id: &str) -> DomainResult<Option<Review>>;

    /// All reviews for a property, newest first
    async fn find_for_property(&self, property_id: &str) -> DomainResult<Vec<Review>>;

    /// Persist changes to an existing review
    async fn update(&self, review: Review) -> DomainResult<Review>;

    /// Hard delete; `DomainError::NotFound` when the ID does not resolve
    async fn delete(&self, id: &str) -> DomainResult<()>;
}
