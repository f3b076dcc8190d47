//! Property repository interface

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::model::Property;
use crate::domain::DomainResult;
use crate::shared::{PaginatedResult, PaginationParams};

/// Optional list filters
#[derive(Debug, Clone, Default)]
pub struct PropertyFilter {
    pub city: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub bedrooms: Option<i32>,
}

#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn save(&self, property: Property) -> DomainResult<Property>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Property>>;

    /// Active listings matching the filter, newest first
    async fn list(
        &self,
        filter: PropertyFilter,
        pagination: PaginationParams,
    ) -> DomainResult<PaginatedResult<Property>>;

    /// All properties of a landlord, newest first
    async fn find_for_landlord(&self, landlord_id: &str) -> DomainResult<Vec<Property>>;

    async fn update(&self, property: Property) -> DomainResult<Property>;

    async fn delete(&self, id: &str) -> DomainResult<()>;

    /// Overwrite the cached rating aggregate
    async fn update_rating(
        &self,
        property_id: &str,
        average_rating: f64,
        total_reviews: i32,
    ) -> DomainResult<()>;
}
