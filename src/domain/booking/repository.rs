//! Booking repository interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::{Booking, BookingStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Find booking by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>>;

    /// All bookings for a property, ordered by check-in date ascending
    async fn find_for_property(&self, property_id: &str) -> DomainResult<Vec<Booking>>;

    /// Active (PENDING/ACCEPTED/CONFIRMED) bookings for a property,
    /// ordered by check-in date ascending
    async fn find_active_for_property(&self, property_id: &str) -> DomainResult<Vec<Booking>>;

    /// All bookings made by a tenant, most recent check-in first
    async fn find_for_tenant(&self, tenant_id: &str) -> DomainResult<Vec<Booking>>;

    /// Active bookings whose range overlaps [check_in, check_out)
    async fn find_conflicting(
        &self,
        property_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> DomainResult<Vec<Booking>>;

    /// Insert the booking only if no active booking overlaps its range and
    /// no blocking availability window covers it. The conflict check and the
    /// insert run inside a single database transaction.
    ///
    /// Returns `DomainError::Conflict` when the dates are taken.
    async fn create_if_available(&self, booking: Booking) -> DomainResult<Booking>;

    /// Update the status of an existing booking
    async fn update_status(&self, id: &str, status: BookingStatus) -> DomainResult<Booking>;

    /// First COMPLETED booking for (property, tenant) with no review yet,
    /// ordered by check-in date ascending
    async fn find_first_unreviewed_completed(
        &self,
        property_id: &str,
        tenant_id: &str,
    ) -> DomainResult<Option<Booking>>;

    /// Number of COMPLETED bookings for (property, tenant)
    async fn count_completed(&self, property_id: &str, tenant_id: &str) -> DomainResult<u64>;
}
