//! Identity resolution service
//!
//! Maps the authenticated user id to the role profile the rest of the system
//! keys on. Bookings, reviews and saved properties are owned by a tenant
//! profile id, properties by a landlord profile id; neither equals the
//! session's user id.

use std::sync::Arc;

use log::info;
use uuid::Uuid;

use crate::domain::user::{LandlordProfile, TenantProfile, User};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

pub struct IdentityService {
    repos: Arc<dyn RepositoryProvider>,
}

impl IdentityService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Full profile for an authenticated user
    pub async fn profile(
        &self,
        user_id: &str,
    ) -> DomainResult<(User, Option<TenantProfile>, Option<LandlordProfile>)> {
        let user = self
            .repos
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", user_id))?;
        let tenant = self.repos.users().find_tenant_by_user_id(user_id).await?;
        let landlord = self.repos.users().find_landlord_by_user_id(user_id).await?;
        Ok((user, tenant, landlord))
    }

    /// Tenant profile for a user, auto-provisioned on first sight.
    ///
    /// Idempotent under concurrent first-time calls: a unique-constraint
    /// race on the insert is resolved by re-fetching the winner's row.
    pub async fn resolve_or_provision_tenant(&self, user_id: &str) -> DomainResult<TenantProfile> {
        if let Some(profile) = self.repos.users().find_tenant_by_user_id(user_id).await? {
            return Ok(profile);
        }

        info!("Provisioning tenant profile for user {}", user_id);
        let fresh = TenantProfile::new(Uuid::new_v4().to_string(), user_id);
        match self.repos.users().create_tenant_profile(fresh).await {
            Ok(profile) => Ok(profile),
            Err(DomainError::Conflict(_)) => self
                .repos
                .users()
                .find_tenant_by_user_id(user_id)
                .await?
                .ok_or_else(|| DomainError::not_found("Tenant", "user_id", user_id)),
            Err(e) => Err(e),
        }
    }

    /// Update common user fields plus the role-specific profile fields
    pub async fn update_profile(
        &self,
        user_id: &str,
        first_name: Option<String>,
        last_name: Option<String>,
        phone_number: Option<String>,
        bio: Option<String>,
        occupation: Option<String>,
        business_name: Option<String>,
    ) -> DomainResult<(User, Option<TenantProfile>, Option<LandlordProfile>)> {
        let mut user = self
            .repos
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", user_id))?;

        if first_name.is_some() {
            user.first_name = first_name;
        }
        if last_name.is_some() {
            user.last_name = last_name;
        }
        if phone_number.is_some() {
            user.phone_number = phone_number;
        }
        user.updated_at = chrono::Utc::now();
        let user = self.repos.users().update(user).await?;

        let mut tenant = self.repos.users().find_tenant_by_user_id(user_id).await?;
        if let Some(profile) = tenant.as_mut() {
            if bio.is_some() || occupation.is_some() {
                if bio.is_some() {
                    profile.bio = bio.clone();
                }
                if occupation.is_some() {
                    profile.occupation = occupation;
                }
                profile.updated_at = chrono::Utc::now();
                *profile = self
                    .repos
                    .users()
                    .update_tenant_profile(profile.clone())
                    .await?;
            }
        }

        let mut landlord = self.repos.users().find_landlord_by_user_id(user_id).await?;
        if let Some(profile) = landlord.as_mut() {
            if bio.is_some() || business_name.is_some() {
                if bio.is_some() {
                    profile.bio = bio;
                }
                if business_name.is_some() {
                    profile.business_name = business_name;
                }
                profile.updated_at = chrono::Utc::now();
                *profile = self
                    .repos
                    .users()
                    .update_landlord_profile(profile.clone())
                    .await?;
            }
        }

        Ok((user, tenant, landlord))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserRole;
    use crate::infrastructure::storage::InMemoryStorage;

    fn service_with_storage() -> (IdentityService, Arc<InMemoryStorage>) {
        let storage = Arc::new(InMemoryStorage::new());
        let repos: Arc<dyn RepositoryProvider> = storage.clone();
        (IdentityService::new(repos), storage)
    }

    async fn seed_user(storage: &InMemoryStorage, id: &str, role: UserRole) {
        storage
            .users()
            .create_with_profile(User::new(id, format!("{id}@test.io"), "hash", role))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn provisions_tenant_profile_on_first_sight() {
        let (service, storage) = service_with_storage();
        // user exists but has no tenant profile (e.g. external identity)
        storage
            .users()
            .create_with_profile(User::new("u-1", "u1@test.io", "hash", UserRole::Landlord))
            .await
            .unwrap();

        let profile = service.resolve_or_provision_tenant("u-1").await.unwrap();
        assert_eq!(profile.user_id, "u-1");

        // second call resolves the same profile
        let again = service.resolve_or_provision_tenant("u-1").await.unwrap();
        assert_eq!(again.id, profile.id);
    }

    #[tokio::test]
    async fn profile_returns_role_specific_rows() {
        let (service, storage) = service_with_storage();
        seed_user(&storage, "u-t", UserRole::Tenant).await;
        seed_user(&storage, "u-l", UserRole::Landlord).await;

        let (user, tenant, landlord) = service.profile("u-t").await.unwrap();
        assert_eq!(user.role, UserRole::Tenant);
        assert!(tenant.is_some());
        assert!(landlord.is_none());

        let (user, tenant, landlord) = service.profile("u-l").await.unwrap();
        assert_eq!(user.role, UserRole::Landlord);
        assert!(tenant.is_none());
        assert!(landlord.is_some());
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let (service, _storage) = service_with_storage();
        let err = service.profile("ghost").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn update_profile_dispatches_on_role() {
        let (service, storage) = service_with_storage();
        seed_user(&storage, "u-l", UserRole::Landlord).await;

        let (user, _tenant, landlord) = service
            .update_profile(
                "u-l",
                Some("Ada".into()),
                None,
                None,
                Some("Veteran host".into()),
                None,
                Some("Ada Lettings".into()),
            )
            .await
            .unwrap();

        assert_eq!(user.first_name.as_deref(), Some("Ada"));
        let landlord = landlord.unwrap();
        assert_eq!(landlord.bio.as_deref(), Some("Veteran host"));
        assert_eq!(landlord.business_name.as_deref(), Some("Ada Lettings"));
    }
}
