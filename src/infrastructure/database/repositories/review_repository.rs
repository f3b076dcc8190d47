//! SeaORM implementation of ReviewRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::review::{Review, ReviewRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::review;

use super::db_err;

pub struct SeaOrmReviewRepository {
    db: DatabaseConnection,
}

impl SeaOrmReviewRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: review::Model) -> Review {
    Review {
        id: m.id,
        property_id: m.property_id,
        tenant_id: m.tenant_id,
        booking_id: m.booking_id,
        rating: m.rating,
        review_text: m.review_text,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(r: &Review) -> review::ActiveModel {
    review::ActiveModel {
        id: Set(r.id.clone()),
        property_id: Set(r.property_id.clone()),
        tenant_id: Set(r.tenant_id.clone()),
        booking_id: Set(r.booking_id.clone()),
        rating: Set(r.rating),
        review_text: Set(r.review_text.clone()),
        created_at: Set(r.created_at),
        updated_at: Set(r.updated_at),
    }
}

// ── ReviewRepository impl ───────────────────────────────────────

#[async_trait]
impl ReviewRepository for SeaOrmReviewRepository {
    async fn save(&self, r: Review) -> DomainResult<Review> {
        debug!("Saving review {} for booking {}", r.id, r.booking_id);
        // The unique index on booking_id turns a double-submit into Conflict
        domain_to_active(&r).insert(&self.db).await.map_err(db_err)?;
        Ok(r)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Review>> {
        let model = review::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_booking_id(&self, booking_id: &str) -> DomainResult<Option<Review>> {
        let model = review::Entity::find()
            .filter(review::Column::BookingId.eq(booking_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_for_property(&self, property_id: &str) -> DomainResult<Vec<Review>> {
        let models = review::Entity::find()
            .filter(review::Column::PropertyId.eq(property_id))
            .order_by_desc(review::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, r: Review) -> DomainResult<Review> {
        debug!("Updating review {}", r.id);

        let existing = review::Entity::find_by_id(&r.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("Review", "id", &r.id));
        }

        domain_to_active(&r).update(&self.db).await.map_err(db_err)?;
        Ok(r)
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let existing = review::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        let Some(existing) = existing else {
            return Err(DomainError::not_found("Review", "id", id));
        };

        review::Entity::delete_by_id(existing.id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
