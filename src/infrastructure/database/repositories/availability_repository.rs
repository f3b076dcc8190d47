//! SeaORM implementation of AvailabilityRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::availability::{AvailabilityRepository, AvailabilityWindow};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::availability_window;

use super::db_err;

pub struct SeaOrmAvailabilityRepository {
    db: DatabaseConnection,
}

impl SeaOrmAvailabilityRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: availability_window::Model) -> AvailabilityWindow {
    AvailabilityWindow {
        id: m.id,
        property_id: m.property_id,
        start_date: m.start_date,
        end_date: m.end_date,
        is_available: m.is_available,
        price_override: m.price_override,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(w: &AvailabilityWindow) -> availability_window::ActiveModel {
    availability_window::ActiveModel {
        id: Set(w.id.clone()),
        property_id: Set(w.property_id.clone()),
        start_date: Set(w.start_date),
        end_date: Set(w.end_date),
        is_available: Set(w.is_available),
        price_override: Set(w.price_override),
        created_at: Set(w.created_at),
        updated_at: Set(w.updated_at),
    }
}

// ── AvailabilityRepository impl ─────────────────────────────────

#[async_trait]
impl AvailabilityRepository for SeaOrmAvailabilityRepository {
    async fn save(&self, w: AvailabilityWindow) -> DomainResult<AvailabilityWindow> {
        debug!("Saving availability window {} for {}", w.id, w.property_id);
        domain_to_active(&w).insert(&self.db).await.map_err(db_err)?;
        Ok(w)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<AvailabilityWindow>> {
        let model = availability_window::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_for_property(&self, property_id: &str) -> DomainResult<Vec<AvailabilityWindow>> {
        let models = availability_window::Entity::find()
            .filter(availability_window::Column::PropertyId.eq(property_id))
            .order_by_asc(availability_window::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_overlapping(
        &self,
        property_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> DomainResult<Vec<AvailabilityWindow>> {
        // Window end_date is inclusive, the stay range is half-open
        let models = availability_window::Entity::find()
            .filter(availability_window::Column::PropertyId.eq(property_id))
            .filter(availability_window::Column::StartDate.lt(check_out))
            .filter(availability_window::Column::EndDate.gte(check_in))
            .order_by_asc(availability_window::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, w: AvailabilityWindow) -> DomainResult<AvailabilityWindow> {
        debug!("Updating availability window {}", w.id);

        let existing = availability_window::Entity::find_by_id(&w.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("AvailabilityWindow", "id", &w.id));
        }

        domain_to_active(&w).update(&self.db).await.map_err(db_err)?;
        Ok(w)
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let existing = availability_window::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        let Some(existing) = existing else {
            return Err(DomainError::not_found("AvailabilityWindow", "id", id));
        };

        availability_window::Entity::delete_by_id(existing.id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
