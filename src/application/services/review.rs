//! Review business logic
//!
//! Eligibility: one review per COMPLETED booking. The property's cached
//! rating aggregate is recomputed from scratch on every review write.

use std::sync::Arc;

use log::{info, warn};
use uuid::Uuid;

use crate::domain::review::{rating_summary, Review, ReviewEligibility};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

pub const MSG_NOT_A_TENANT: &str = "User is not a tenant.";
pub const MSG_NO_COMPLETED_BOOKINGS: &str = "No completed bookings found for this property.";
pub const MSG_ALREADY_REVIEWED: &str = "You have already reviewed your stay(s).";
pub const MSG_SERVER_ERROR: &str = "Server error checking eligibility.";

pub struct ReviewService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ReviewService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Whether the user may review the property, and against which booking.
    ///
    /// Never errors out: datastore failures degrade to an ineligible result
    /// with a generic message.
    pub async fn check_eligibility(&self, user_id: &str, property_id: &str) -> ReviewEligibility {
        let tenant = match self.repos.users().find_tenant_by_user_id(user_id).await {
            Ok(Some(tenant)) => tenant,
            Ok(None) => return ReviewEligibility::ineligible(MSG_NOT_A_TENANT),
            Err(e) => {
                warn!("Eligibility check failed for user {}: {}", user_id, e);
                return ReviewEligibility::ineligible(MSG_SERVER_ERROR);
            }
        };

        match self
            .repos
            .bookings()
            .find_first_unreviewed_completed(property_id, &tenant.id)
            .await
        {
            Ok(Some(booking)) => ReviewEligibility::eligible(booking.id),
            Ok(None) => {
                match self
                    .repos
                    .bookings()
                    .count_completed(property_id, &tenant.id)
                    .await
                {
                    Ok(0) => ReviewEligibility::ineligible(MSG_NO_COMPLETED_BOOKINGS),
                    Ok(_) => ReviewEligibility::ineligible(MSG_ALREADY_REVIEWED),
                    Err(e) => {
                        warn!("Eligibility check failed for user {}: {}", user_id, e);
                        ReviewEligibility::ineligible(MSG_SERVER_ERROR)
                    }
                }
            }
            Err(e) => {
                warn!("Eligibility check failed for user {}: {}", user_id, e);
                ReviewEligibility::ineligible(MSG_SERVER_ERROR)
            }
        }
    }

    /// Create a review against one of the caller's completed bookings, then
    /// recompute the property's rating aggregate.
    ///
    /// The unique constraint on booking_id means a concurrent double-submit
    /// leaves exactly one persisted review.
    pub async fn create_review(
        &self,
        user_id: &str,
        property_id: &str,
        booking_id: &str,
        rating: i32,
        review_text: Option<String>,
    ) -> DomainResult<Review> {
        let tenant = self
            .repos
            .users()
            .find_tenant_by_user_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Tenant", "user_id", user_id))?;

        let booking = self
            .repos
            .bookings()
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", "id", booking_id))?;

        if booking.tenant_id != tenant.id {
            return Err(DomainError::Forbidden(
                "You can only review your own stays".to_string(),
            ));
        }
        if booking.property_id != property_id {
            return Err(DomainError::Validation(
                "Booking does not belong to this property".to_string(),
            ));
        }
        if !booking.is_completed() {
            return Err(DomainError::Validation(
                "Only completed stays can be reviewed".to_string(),
            ));
        }

        let review = Review::new(
            Uuid::new_v4().to_string(),
            property_id,
            &tenant.id,
            booking_id,
            rating,
            review_text,
        )?;

        let review = self.repos.reviews().save(review).await?;
        info!(
            "Review {} created for property {} (booking {})",
            review.id, property_id, booking_id
        );

        self.recompute_rating(property_id).await?;
        Ok(review)
    }

    /// Edit the caller's own review and refresh the aggregate
    pub async fn update_review(
        &self,
        user_id: &str,
        review_id: &str,
        rating: i32,
        review_text: Option<String>,
    ) -> DomainResult<Review> {
        let mut review = self.owned_review(user_id, review_id).await?;
        review.edit(rating, review_text)?;
        let review = self.repos.reviews().update(review).await?;
        self.recompute_rating(&review.property_id).await?;
        Ok(review)
    }

    /// Delete the caller's own review and refresh the aggregate
    pub async fn delete_review(&self, user_id: &str, review_id: &str) -> DomainResult<()> {
        let review = self.owned_review(user_id, review_id).await?;
        self.repos.reviews().delete(&review.id).await?;
        self.recompute_rating(&review.property_id).await
    }

    /// Reviews for a property, newest first
    pub async fn reviews_for_property(&self, property_id: &str) -> DomainResult<Vec<Review>> {
        self.repos.reviews().find_for_property(property_id).await
    }

    /// Fetch a review and verify the caller's tenant profile owns it.
    /// Ownership is enforced on update and delete alike.
    async fn owned_review(&self, user_id: &str, review_id: &str) -> DomainResult<Review> {
        let tenant = self
            .repos
            .users()
            .find_tenant_by_user_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Tenant", "user_id", user_id))?;

        let review = self
            .repos
            .reviews()
            .find_by_id(review_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Review", "id", review_id))?;

        if review.tenant_id != tenant.id {
            return Err(DomainError::Forbidden(
                "You can only modify your own reviews".to_string(),
            ));
        }
        Ok(review)
    }

    /// Full aggregate recompute over all of the property's reviews. O(n) in
    /// review count; fine at this scale, revisit if volumes grow.
    async fn recompute_rating(&self, property_id: &str) -> DomainResult<()> {
        let reviews = self.repos.reviews().find_for_property(property_id).await?;
        let ratings: Vec<i32> = reviews.iter().map(|r| r.rating).collect();
        let (average, count) = rating_summary(&ratings);
        self.repos
            .properties()
            .update_rating(property_id, average, count)
            .await
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::domain::booking::{Booking, BookingStatus};
    use crate::domain::property::Property;
    use crate::domain::user::{User, UserRole};
    use crate::infrastructure::storage::InMemoryStorage;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    struct Fixture {
        service: ReviewService,
        storage: Arc<InMemoryStorage>,
        tenant_user: String,
        tenant_id: String,
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
        storage
            .users()
            .create_with_profile(User::new("u-t", "t@test.io", "hash", UserRole::Tenant))
            .await
            .unwrap();

        let landlord = storage
            .users()
            .find_landlord_by_user_id("u-ll")
            .await
            .unwrap()
            .unwrap();
        let tenant = storage
            .users()
            .find_tenant_by_user_id("u-t")
            .await
            .unwrap()
            .unwrap();

        let property = Property::new(
            "prop-1",
            &landlord.id,
            "Canal apartment",
            "2 Bridge Street",
            "Delft",
            Decimal::new(1100000, 2),
            1,
            1,
        );
        storage.properties().save(property).await.unwrap();

        Fixture {
            service: ReviewService::new(repos),
            storage,
            tenant_user: "u-t".to_string(),
            tenant_id: tenant.id,
            property_id: "prop-1".to_string(),
        }
    }

    async fn seed_booking(f: &Fixture, id: &str, check_in: &str, status: BookingStatus) {
        let mut booking = Booking::new(
            id,
            &f.property_id,
            &f.tenant_id,
            d(check_in),
            d(check_in) + chrono::Days::new(7),
            Decimal::new(250000, 2),
        );
        booking.status = status;
        f.storage
            .bookings()
            .create_if_available(booking)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn completed_unreviewed_booking_is_eligible() {
        let f = fixture().await;
        seed_booking(&f, "b-1", "2026-01-10", BookingStatus::Completed).await;

        let result = f
            .service
            .check_eligibility(&f.tenant_user, &f.property_id)
            .await;
        assert!(result.eligible);
        assert_eq!(result.booking_id.as_deref(), Some("b-1"));
        assert!(result.message.is_none());
    }

    #[tokio::test]
    async fn earliest_completed_booking_wins() {
        let f = fixture().await;
        seed_booking(&f, "b-later", "2026-03-01", BookingStatus::Completed).await;
        seed_booking(&f, "b-earlier", "2026-01-10", BookingStatus::Completed).await;

        let result = f
            .service
            .check_eligibility(&f.tenant_user, &f.property_id)
            .await;
        assert_eq!(result.booking_id.as_deref(), Some("b-earlier"));
    }

    #[tokio::test]
    async fn non_tenant_is_not_eligible() {
        let f = fixture().await;
        let result = f.service.check_eligibility("u-ll", &f.property_id).await;
        assert!(!result.eligible);
        assert_eq!(result.message.as_deref(), Some(MSG_NOT_A_TENANT));
    }

    #[tokio::test]
    async fn no_completed_bookings_message() {
        let f = fixture().await;
        seed_booking(&f, "b-1", "2026-01-10", BookingStatus::Pending).await;

        let result = f
            .service
            .check_eligibility(&f.tenant_user, &f.property_id)
            .await;
        assert!(!result.eligible);
        assert_eq!(result.message.as_deref(), Some(MSG_NO_COMPLETED_BOOKINGS));
    }

    #[tokio::test]
    async fn already_reviewed_message() {
        let f = fixture().await;
        seed_booking(&f, "b-1", "2026-01-10", BookingStatus::Completed).await;
        f.service
            .create_review(&f.tenant_user, &f.property_id, "b-1", 5, None)
            .await
            .unwrap();

        let result = f
            .service
            .check_eligibility(&f.tenant_user, &f.property_id)
            .await;
        assert!(!result.eligible);
        assert_eq!(result.message.as_deref(), Some(MSG_ALREADY_REVIEWED));
    }

    #[tokio::test]
    async fn create_review_updates_property_aggregate() {
        let f = fixture().await;

        // N = 0
        let property = f
            .storage
            .properties()
            .find_by_id(&f.property_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(property.average_rating, 0.0);
        assert_eq!(property.total_reviews, 0);

        // N = 1
        seed_booking(&f, "b-1", "2026-01-10", BookingStatus::Completed).await;
        f.service
            .create_review(&f.tenant_user, &f.property_id, "b-1", 4, Some("Nice".into()))
            .await
            .unwrap();
        let property = f
            .storage
            .properties()
            .find_by_id(&f.property_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(property.average_rating, 4.0);
        assert_eq!(property.total_reviews, 1);

        // N = 5, mixed ratings: 4, 5, 3, 1, 2 -> mean 3.0
        for (i, rating) in [5, 3, 1, 2].iter().enumerate() {
            let booking_id = format!("b-{}", i + 2);
            seed_booking(&f, &booking_id, "2026-02-01", BookingStatus::Completed).await;
            f.service
                .create_review(&f.tenant_user, &f.property_id, &booking_id, *rating, None)
                .await
                .unwrap();
        }
        let property = f
            .storage
            .properties()
            .find_by_id(&f.property_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(property.total_reviews, 5);
        assert!((property.average_rating - 3.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn double_submit_leaves_one_review() {
        let f = fixture().await;
        seed_booking(&f, "b-1", "2026-01-10", BookingStatus::Completed).await;

        f.service
            .create_review(&f.tenant_user, &f.property_id, "b-1", 5, None)
            .await
            .unwrap();
        let err = f
            .service
            .create_review(&f.tenant_user, &f.property_id, "b-1", 5, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let reviews = f
            .service
            .reviews_for_property(&f.property_id)
            .await
            .unwrap();
        assert_eq!(reviews.len(), 1);
    }

    #[tokio::test]
    async fn pending_booking_cannot_be_reviewed() {
        let f = fixture().await;
        seed_booking(&f, "b-1", "2026-01-10", BookingStatus::Pending).await;

        let err = f
            .service
            .create_review(&f.tenant_user, &f.property_id, "b-1", 5, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn rating_out_of_bounds_is_rejected() {
        let f = fixture().await;
        seed_booking(&f, "b-1", "2026-01-10", BookingStatus::Completed).await;

        let err = f
            .service
            .create_review(&f.tenant_user, &f.property_id, "b-1", 6, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn update_and_delete_enforce_ownership() {
        let f = fixture().await;
        seed_booking(&f, "b-1", "2026-01-10", BookingStatus::Completed).await;
        let review = f
            .service
            .create_review(&f.tenant_user, &f.property_id, "b-1", 5, None)
            .await
            .unwrap();

        f.storage
            .users()
            .create_with_profile(User::new("u-x", "x@test.io", "hash", UserRole::Tenant))
            .await
            .unwrap();

        let err = f
            .service
            .update_review("u-x", &review.id, 1, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        let err = f.service.delete_review("u-x", &review.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        // owner can do both
        f.service
            .update_review(&f.tenant_user, &review.id, 3, Some("Revised".into()))
            .await
            .unwrap();
        f.service
            .delete_review(&f.tenant_user, &review.id)
            .await
            .unwrap();

        let property = f
            .storage
            .properties()
            .find_by_id(&f.property_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(property.total_reviews, 0);
        assert_eq!(property.average_rating, 0.0);
    }

    #[tokio::test]
    async fn update_refreshes_the_aggregate() {
        let f = fixture().await;
        seed_booking(&f, "b-1", "2026-01-10", BookingStatus::Completed).await;
        let review = f
            .service
            .create_review(&f.tenant_user, &f.property_id, "b-1", 5, None)
            .await
            .unwrap();

        f.service
            .update_review(&f.tenant_user, &review.id, 1, None)
            .await
            .unwrap();

        let property = f
            .storage
            .properties()
            .find_by_id(&f.property_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(property.average_rating, 1.0);
        assert_eq!(property.total_reviews, 1);
    }
}
