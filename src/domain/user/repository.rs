//! User repository interface

use async_trait::async_trait;

use super::model::{LandlordProfile, TenantProfile, User};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    async fn count(&self) -> DomainResult<u64>;

    /// Insert the user together with the role-specific profile row, in one
    /// transaction. A duplicate email surfaces as `DomainError::Conflict`.
    async fn create_with_profile(&self, user: User) -> DomainResult<User>;

    async fn update(&self, user: User) -> DomainResult<User>;

    /// Tenant profile for a user id, if the user has one
    async fn find_tenant_by_user_id(&self, user_id: &str) -> DomainResult<Option<TenantProfile>>;

    /// Landlord profile for a user id, if the user has one
    async fn find_landlord_by_user_id(
        &self,
        user_id: &str,
    ) -> DomainResult<Option<LandlordProfile>>;

    /// Insert a tenant profile. A concurrent insert for the same user must
    /// surface as `DomainError::Conflict` so callers can re-fetch.
    async fn create_tenant_profile(&self, profile: TenantProfile) -> DomainResult<TenantProfile>;

    async fn update_tenant_profile(&self, profile: TenantProfile) -> DomainResult<TenantProfile>;

    async fn update_landlord_profile(
        &self,
        profile: LandlordProfile,
    ) -> DomainResult<LandlordProfile>;
}
