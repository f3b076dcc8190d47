//! SeaORM implementation of PropertyRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::domain::property::{Property, PropertyFilter, PropertyRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::property;
use crate::shared::{PaginatedResult, PaginationParams};

use super::db_err;

pub struct SeaOrmPropertyRepository {
    db: DatabaseConnection,
}

impl SeaOrmPropertyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: property::Model) -> Property {
    Property {
        id: m.id,
        landlord_id: m.landlord_id,
        title: m.title,
        description: m.description,
        address: m.address,
        city: m.city,
        price_per_month: m.price_per_month,
        bedrooms: m.bedrooms,
        bathrooms: m.bathrooms,
        average_rating: m.average_rating,
        total_reviews: m.total_reviews,
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(p: &Property) -> property::ActiveModel {
    property::ActiveModel {
        id: Set(p.id.clone()),
        landlord_id: Set(p.landlord_id.clone()),
        title: Set(p.title.clone()),
        description: Set(p.description.clone()),
        address: Set(p.address.clone()),
        city: Set(p.city.clone()),
        price_per_month: Set(p.price_per_month),
        bedrooms: Set(p.bedrooms),
        bathrooms: Set(p.bathrooms),
        average_rating: Set(p.average_rating),
        total_reviews: Set(p.total_reviews),
        is_active: Set(p.is_active),
        created_at: Set(p.created_at),
        updated_at: Set(p.updated_at),
    }
}

fn apply_filter(
    mut query: sea_orm::Select<property::Entity>,
    filter: &PropertyFilter,
) -> sea_orm::Select<property::Entity> {
    query = query.filter(property::Column::IsActive.eq(true));
    if let Some(city) = &filter.city {
        query = query.filter(property::Column::City.eq(city.as_str()));
    }
    if let Some(min) = filter.min_price {
        query = query.filter(property::Column::PricePerMonth.gte(min));
    }
    if let Some(max) = filter.max_price {
        query = query.filter(property::Column::PricePerMonth.lte(max));
    }
    if let Some(bedrooms) = filter.bedrooms {
        query = query.filter(property::Column::Bedrooms.gte(bedrooms));
    }
    query
}

// ── PropertyRepository impl ─────────────────────────────────────

#[async_trait]
impl PropertyRepository for SeaOrmPropertyRepository {
    async fn save(&self, p: Property) -> DomainResult<Property> {
        debug!("Saving property {} for landlord {}", p.id, p.landlord_id);
        domain_to_active(&p).insert(&self.db).await.map_err(db_err)?;
        Ok(p)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Property>> {
        let model = property::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn list(
        &self,
        filter: PropertyFilter,
        pagination: PaginationParams,
    ) -> DomainResult<PaginatedResult<Property>> {
        let total = apply_filter(property::Entity::find(), &filter)
            .count(&self.db)
            .await
            .map_err(db_err)?;

        let models = apply_filter(property::Entity::find(), &filter)
            .order_by_desc(property::Column::CreatedAt)
            .offset(pagination.offset())
            .limit(pagination.limit as u64)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(PaginatedResult::new(
            models.into_iter().map(model_to_domain).collect(),
            total,
            pagination.page,
            pagination.limit,
        ))
    }

    async fn find_for_landlord(&self, landlord_id: &str) -> DomainResult<Vec<Property>> {
        let models = property::Entity::find()
            .filter(property::Column::LandlordId.eq(landlord_id))
            .order_by_desc(property::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, p: Property) -> DomainResult<Property> {
        let existing = property::Entity::find_by_id(&p.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("Property", "id", &p.id));
        }

        domain_to_active(&p).update(&self.db).await.map_err(db_err)?;
        Ok(p)
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let existing = property::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        let Some(existing) = existing else {
            return Err(DomainError::not_found("Property", "id", id));
        };

        property::Entity::delete_by_id(existing.id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn update_rating(
        &self,
        property_id: &str,
        average_rating: f64,
        total_reviews: i32,
    ) -> DomainResult<()> {
        debug!(
            "Updating rating for property {}: {:.2} over {} reviews",
            property_id, average_rating, total_reviews
        );

        let existing = property::Entity::find_by_id(property_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Property", "id", property_id))?;

        let mut active: property::ActiveModel = existing.into();
        active.average_rating = Set(average_rating);
        active.total_reviews = Set(total_reviews);
        active.updated_at = Set(chrono::Utc::now());
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }
}
