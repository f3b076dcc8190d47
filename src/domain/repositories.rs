//! Repository provider — one accessor per aggregate repository

use crate::domain::availability::AvailabilityRepository;
use crate::domain::booking::BookingRepository;
use crate::domain::property::PropertyRepository;
use crate::domain::review::ReviewRepository;
use crate::domain::saved_property::SavedPropertyRepository;
use crate::domain::user::UserRepository;
use crate::shared::DomainError;

pub type DomainResult<T> = Result<T, DomainError>;

/// Unified access to all repositories behind one handle with an explicit
/// lifecycle: constructed once at process start over a single connection
/// pool, dropped at shutdown.
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn properties(&self) -> &dyn PropertyRepository;
    fn bookings(&self) -> &dyn BookingRepository;
    fn availability(&self) -> &dyn AvailabilityRepository;
    fn reviews(&self) -> &dyn ReviewRepository;
    fn saved_properties(&self) -> &dyn SavedPropertyRepository;
}
