//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::availability::AvailabilityRepository;
use crate::domain::booking::BookingRepository;
use crate::domain::property::PropertyRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::review::ReviewRepository;
use crate::domain::saved_property::SavedPropertyRepository;
use crate::domain::user::UserRepository;

use super::availability_repository::SeaOrmAvailabilityRepository;
use super::booking_repository::SeaOrmBookingRepository;
use super::property_repository::SeaOrmPropertyRepository;
use super::review_repository::SeaOrmReviewRepository;
use super::saved_property_repository::SeaOrmSavedPropertyRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let property = repos.properties().find_by_id("prop-1").await?;
/// let conflicts = repos.bookings().find_conflicting("prop-1", check_in, check_out).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    users: SeaOrmUserRepository,
    properties: SeaOrmPropertyRepository,
    bookings: SeaOrmBookingRepository,
    availability: SeaOrmAvailabilityRepository,
    reviews: SeaOrmReviewRepository,
    saved_properties: SeaOrmSavedPropertyRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            properties: SeaOrmPropertyRepository::new(db.clone()),
            bookings: SeaOrmBookingRepository::new(db.clone()),
            availability: SeaOrmAvailabilityRepository::new(db.clone()),
            reviews: SeaOrmReviewRepository::new(db.clone()),
            saved_properties: SeaOrmSavedPropertyRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn properties(&self) -> &dyn PropertyRepository {
        &self.properties
    }

    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    fn availability(&self) -> &dyn AvailabilityRepository {
        &self.availability
    }

    fn reviews(&self) -> &dyn ReviewRepository {
        &self.reviews
    }

    fn saved_properties(&self) -> &dyn SavedPropertyRepository {
        &self.saved_properties
    }
}
