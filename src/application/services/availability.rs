//! Availability window business logic
//!
//! Every mutating operation re-verifies ownership through the chain
//! window → property → landlord_id, compared against the landlord profile
//! resolved from the caller's user id. The raw session id is never compared
//! to landlord_id directly.

use std::sync::Arc;

use chrono::NaiveDate;
use log::info;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::availability::{AvailabilityWindow, PriceOverrideUpdate};
use crate::domain::property::Property;
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

pub struct AvailabilityService {
    repos: Arc<dyn RepositoryProvider>,
}

impl AvailabilityService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Resolve the property and verify the caller's landlord profile owns it
    async fn authorize_landlord(&self, user_id: &str, property_id: &str) -> DomainResult<Property> {
        let property = self
            .repos
            .properties()
            .find_by_id(property_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Property", "id", property_id))?;

        let landlord = self
            .repos
            .users()
            .find_landlord_by_user_id(user_id)
            .await?;

        match landlord {
            Some(landlord) if property.is_owned_by(&landlord.id) => Ok(property),
            _ => Err(DomainError::Forbidden(
                "Only the owning landlord can manage this property's calendar".to_string(),
            )),
        }
    }

    pub async fn create_window(
        &self,
        user_id: &str,
        property_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        is_available: bool,
        price_override: Option<Decimal>,
    ) -> DomainResult<AvailabilityWindow> {
        self.authorize_landlord(user_id, property_id).await?;

        let window = AvailabilityWindow::new(
            Uuid::new_v4().to_string(),
            property_id,
            start_date,
            end_date,
            is_available,
            price_override,
        )?;

        info!(
            "Creating availability window {} for property {} ({} - {})",
            window.id, property_id, start_date, end_date
        );
        self.repos.availability().save(window).await
    }

    pub async fn update_window(
        &self,
        user_id: &str,
        window_id: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        is_available: Option<bool>,
        price_override: PriceOverrideUpdate,
    ) -> DomainResult<AvailabilityWindow> {
        let mut window = self
            .repos
            .availability()
            .find_by_id(window_id)
            .await?
            .ok_or_else(|| DomainError::not_found("AvailabilityWindow", "id", window_id))?;

        self.authorize_landlord(user_id, &window.property_id).await?;

        window.apply_update(start_date, end_date, is_available, price_override)?;
        self.repos.availability().update(window).await
    }

    pub async fn delete_window(&self, user_id: &str, window_id: &str) -> DomainResult<()> {
        let window = self
            .repos
            .availability()
            .find_by_id(window_id)
            .await?
            .ok_or_else(|| DomainError::not_found("AvailabilityWindow", "id", window_id))?;

        self.authorize_landlord(user_id, &window.property_id).await?;

        info!("Deleting availability window {}", window_id);
        self.repos.availability().delete(&window.id).await
    }

    /// Public list for a property, ordered by start date ascending
    pub async fn list_for_property(
        &self,
        property_id: &str,
    ) -> DomainResult<Vec<AvailabilityWindow>> {
        self.repos.availability().find_for_property(property_id).await
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{User, UserRole};
    use crate::infrastructure::storage::InMemoryStorage;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    struct Fixture {
        service: AvailabilityService,
        storage: Arc<InMemoryStorage>,
        landlord_user: String,
        property_id: String,
    }

    async fn fixture() -> Fixture {
        let storage = Arc::new(InMemoryStorage::new());
        let repos: Arc<dyn RepositoryProvider> = storage.clone();

        storage
            .users()
            .create_with_profile(User::new("u-ll", "ll@test.io", "hash", UserRole::Landlord))
            .await
            .unwrap();
        let landlord = storage
            .users()
            .find_landlord_by_user_id("u-ll")
            .await
            .unwrap()
            .unwrap();
        let property = Property::new(
            "prop-1",
            &landlord.id,
            "Harbour loft",
            "3 Dock Road",
            "Aarhus",
            Decimal::new(1200000, 2),
            2,
            1,
        );
        storage.properties().save(property).await.unwrap();

        Fixture {
            service: AvailabilityService::new(repos),
            storage,
            landlord_user: "u-ll".to_string(),
            property_id: "prop-1".to_string(),
        }
    }

    #[tokio::test]
    async fn owning_landlord_can_create_window() {
        let f = fixture().await;
        let window = f
            .service
            .create_window(
                &f.landlord_user,
                &f.property_id,
                d("2026-07-01"),
                d("2026-07-31"),
                true,
                Some(Decimal::new(45000, 2)),
            )
            .await
            .unwrap();
        assert_eq!(window.property_id, f.property_id);
        assert_eq!(window.price_override, Some(Decimal::new(45000, 2)));
    }

    #[tokio::test]
    async fn non_owner_is_forbidden() {
        let f = fixture().await;
        f.storage
            .users()
            .create_with_profile(User::new(
                "u-other",
                "other@test.io",
                "hash",
                UserRole::Landlord,
            ))
            .await
            .unwrap();

        let err = f
            .service
            .create_window(
                "u-other",
                &f.property_id,
                d("2026-07-01"),
                d("2026-07-31"),
                false,
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn tenant_user_is_forbidden() {
        let f = fixture().await;
        f.storage
            .users()
            .create_with_profile(User::new("u-t", "t@test.io", "hash", UserRole::Tenant))
            .await
            .unwrap();

        let window = f
            .service
            .create_window(
                &f.landlord_user,
                &f.property_id,
                d("2026-07-01"),
                d("2026-07-31"),
                true,
                None,
            )
            .await
            .unwrap();

        let err = f.service.delete_window("u-t", &window.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn unknown_property_is_not_found() {
        let f = fixture().await;
        let err = f
            .service
            .create_window(
                &f.landlord_user,
                "ghost",
                d("2026-07-01"),
                d("2026-07-31"),
                true,
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn inverted_range_is_rejected() {
        let f = fixture().await;
        let err = f
            .service
            .create_window(
                &f.landlord_user,
                &f.property_id,
                d("2026-08-01"),
                d("2026-07-01"),
                true,
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn update_clears_price_override_only_on_explicit_null() {
        let f = fixture().await;
        let window = f
            .service
            .create_window(
                &f.landlord_user,
                &f.property_id,
                d("2026-07-01"),
                d("2026-07-31"),
                true,
                Some(Decimal::new(45000, 2)),
            )
            .await
            .unwrap();

        // omitted field keeps the override
        let kept = f
            .service
            .update_window(
                &f.landlord_user,
                &window.id,
                None,
                Some(d("2026-08-15")),
                None,
                PriceOverrideUpdate::Keep,
            )
            .await
            .unwrap();
        assert_eq!(kept.price_override, Some(Decimal::new(45000, 2)));
        assert_eq!(kept.end_date, d("2026-08-15"));

        // explicit clear removes it
        let cleared = f
            .service
            .update_window(
                &f.landlord_user,
                &window.id,
                None,
                None,
                None,
                PriceOverrideUpdate::Clear,
            )
            .await
            .unwrap();
        assert_eq!(cleared.price_override, None);
    }

    #[tokio::test]
    async fn delete_is_a_hard_delete_and_missing_id_errors() {
        let f = fixture().await;
        let window = f
            .service
            .create_window(
                &f.landlord_user,
                &f.property_id,
                d("2026-07-01"),
                d("2026-07-31"),
                false,
                None,
            )
            .await
            .unwrap();

        f.service
            .delete_window(&f.landlord_user, &window.id)
            .await
            .unwrap();

        let err = f
            .service
            .delete_window(&f.landlord_user, &window.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn list_is_ordered_by_start_date() {
        let f = fixture().await;
        for (start, end) in [
            ("2026-09-01", "2026-09-30"),
            ("2026-07-01", "2026-07-31"),
            ("2026-08-01", "2026-08-31"),
        ] {
            f.service
                .create_window(&f.landlord_user, &f.property_id, d(start), d(end), true, None)
                .await
                .unwrap();
        }

        let windows = f.service.list_for_property(&f.property_id).await.unwrap();
        let starts: Vec<NaiveDate> = windows.iter().map(|w| w.start_date).collect();
        assert_eq!(starts, vec![d("2026-07-01"), d("2026-08-01"), d("2026-09-01")]);
    }
}
