//! SeaORM implementation of BookingRepository

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::domain::booking::{Booking, BookingRepository, BookingStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{availability_window, booking, review};

use super::db_err;

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: booking::Model) -> Booking {
    Booking {
        id: m.id,
        property_id: m.property_id,
        tenant_id: m.tenant_id,
        check_in_date: m.check_in_date,
        check_out_date: m.check_out_date,
        status: BookingStatus::from_str(&m.status),
        total_price: m.total_price,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(b: &Booking) -> booking::ActiveModel {
    booking::ActiveModel {
        id: Set(b.id.clone()),
        property_id: Set(b.property_id.clone()),
        tenant_id: Set(b.tenant_id.clone()),
        check_in_date: Set(b.check_in_date),
        check_out_date: Set(b.check_out_date),
        status: Set(b.status.as_str().to_string()),
        total_price: Set(b.total_price),
        created_at: Set(b.created_at),
        updated_at: Set(b.updated_at),
    }
}

fn active_status_strings() -> Vec<&'static str> {
    BookingStatus::active().iter().map(|s| s.as_str()).collect()
}

/// Active bookings overlapping [check_in, check_out) under the half-open
/// rule: existing.check_in < check_out AND existing.check_out > check_in.
async fn conflicting_query<C: ConnectionTrait>(
    conn: &C,
    property_id: &str,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> Result<Vec<booking::Model>, sea_orm::DbErr> {
    booking::Entity::find()
        .filter(booking::Column::PropertyId.eq(property_id))
        .filter(booking::Column::Status.is_in(active_status_strings()))
        .filter(booking::Column::CheckInDate.lt(check_out))
        .filter(booking::Column::CheckOutDate.gt(check_in))
        .all(conn)
        .await
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_for_property(&self, property_id: &str) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::PropertyId.eq(property_id))
            .order_by_asc(booking::Column::CheckInDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_active_for_property(&self, property_id: &str) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::PropertyId.eq(property_id))
            .filter(booking::Column::Status.is_in(active_status_strings()))
            .order_by_asc(booking::Column::CheckInDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_for_tenant(&self, tenant_id: &str) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::TenantId.eq(tenant_id))
            .order_by_desc(booking::Column::CheckInDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_conflicting(
        &self,
        property_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> DomainResult<Vec<Booking>> {
        let models = conflicting_query(&self.db, property_id, check_in, check_out)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn create_if_available(&self, b: Booking) -> DomainResult<Booking> {
        debug!("Creating booking {} for property {}", b.id, b.property_id);

        // Check-then-insert must be atomic: two concurrent requests for
        // overlapping dates must not both pass the conflict check.
        let txn = self.db.begin().await.map_err(db_err)?;

        let conflicts =
            conflicting_query(&txn, &b.property_id, b.check_in_date, b.check_out_date)
                .await
                .map_err(db_err)?;
        if !conflicts.is_empty() {
            txn.rollback().await.map_err(db_err)?;
            return Err(DomainError::Conflict(
                "Property is not available for the selected dates".to_string(),
            ));
        }

        // Landlord-declared blocked ranges count against the same check
        let blocking = availability_window::Entity::find()
            .filter(availability_window::Column::PropertyId.eq(b.property_id.as_str()))
            .filter(availability_window::Column::IsAvailable.eq(false))
            .filter(availability_window::Column::StartDate.lt(b.check_out_date))
            .filter(availability_window::Column::EndDate.gte(b.check_in_date))
            .one(&txn)
            .await
            .map_err(db_err)?;
        if blocking.is_some() {
            txn.rollback().await.map_err(db_err)?;
            return Err(DomainError::Conflict(
                "Property is not available for the selected dates".to_string(),
            ));
        }

        domain_to_active(&b).insert(&txn).await.map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;
        Ok(b)
    }

    async fn update_status(&self, id: &str, status: BookingStatus) -> DomainResult<Booking> {
        let existing = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Booking", "id", id))?;

        let mut active: booking::ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Utc::now());
        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(updated))
    }

    async fn find_first_unreviewed_completed(
        &self,
        property_id: &str,
        tenant_id: &str,
    ) -> DomainResult<Option<Booking>> {
        // LEFT JOIN against reviews; eligible rows are those with no review
        let model = booking::Entity::find()
            .filter(booking::Column::PropertyId.eq(property_id))
            .filter(booking::Column::TenantId.eq(tenant_id))
            .filter(booking::Column::Status.eq(BookingStatus::Completed.as_str()))
            .left_join(review::Entity)
            .filter(review::Column::Id.is_null())
            .order_by_asc(booking::Column::CheckInDate)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn count_completed(&self, property_id: &str, tenant_id: &str) -> DomainResult<u64> {
        booking::Entity::find()
            .filter(booking::Column::PropertyId.eq(property_id))
            .filter(booking::Column::TenantId.eq(tenant_id))
            .filter(booking::Column::Status.eq(BookingStatus::Completed.as_str()))
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}
