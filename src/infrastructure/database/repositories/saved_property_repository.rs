//! SeaORM implementation of SavedPropertyRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::saved_property::{SavedProperty, SavedPropertyRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::saved_property;

use super::db_err;

pub struct SeaOrmSavedPropertyRepository {
    db: DatabaseConnection,
}

impl SeaOrmSavedPropertyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: saved_property::Model) -> SavedProperty {
    SavedProperty {
        id: m.id,
        tenant_id: m.tenant_id,
        property_id: m.property_id,
        created_at: m.created_at,
    }
}

#[async_trait]
impl SavedPropertyRepository for SeaOrmSavedPropertyRepository {
    async fn save(&self, s: SavedProperty) -> DomainResult<SavedProperty> {
        debug!("Saving property {} for tenant {}", s.property_id, s.tenant_id);
        saved_property::ActiveModel {
            id: Set(s.id.clone()),
            tenant_id: Set(s.tenant_id.clone()),
            property_id: Set(s.property_id.clone()),
            created_at: Set(s.created_at),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;
        Ok(s)
    }

    async fn find(
        &self,
        tenant_id: &str,
        property_id: &str,
    ) -> DomainResult<Option<SavedProperty>> {
        let model = saved_property::Entity::find()
            .filter(saved_property::Column::TenantId.eq(tenant_id))
            .filter(saved_property::Column::PropertyId.eq(property_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_for_tenant(&self, tenant_id: &str) -> DomainResult<Vec<SavedProperty>> {
        let models = saved_property::Entity::find()
            .filter(saved_property::Column::TenantId.eq(tenant_id))
            .order_by_desc(saved_property::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn delete(&self, tenant_id: &str, property_id: &str) -> DomainResult<()> {
        let existing = saved_property::Entity::find()
            .filter(saved_property::Column::TenantId.eq(tenant_id))
            .filter(saved_property::Column::PropertyId.eq(property_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        let Some(existing) = existing else {
            return Err(DomainError::not_found(
                "SavedProperty",
                "property_id",
                property_id,
            ));
        };

        saved_property::Entity::delete_by_id(existing.id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
