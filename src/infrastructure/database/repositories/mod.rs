//! SeaORM repository implementations

pub mod availability_repository;
pub mod booking_repository;
pub mod property_repository;
pub mod repository_provider;
pub mod review_repository;
pub mod saved_property_repository;
pub mod user_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use crate::domain::DomainError;

/// Map a SeaORM error to the domain taxonomy. Unique-constraint violations
/// become conflicts so check-then-insert races surface as 409s, everything
/// else is an opaque database failure.
pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    if matches!(e.sql_err(), Some(sea_orm::SqlErr::UniqueConstraintViolation(_))) {
        return DomainError::Conflict(format!("Duplicate record: {}", e));
    }
    DomainError::Database(e.to_string())
}
