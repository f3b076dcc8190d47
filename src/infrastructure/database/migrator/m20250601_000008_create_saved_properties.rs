//! Create saved_properties table

use sea_orm_migration::prelude::*;

use super::m20250601_000002_create_tenants::Tenants;
use super::m20250601_000004_create_properties::Properties;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SavedProperties::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SavedProperties::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SavedProperties::TenantId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SavedProperties::PropertyId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SavedProperties::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_saved_properties_tenant")
                            .from(SavedProperties::Table, SavedProperties::TenantId)
                            .to(Tenants::Table, Tenants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_saved_properties_property")
                            .from(SavedProperties::Table, SavedProperties::PropertyId)
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_saved_properties_tenant_property")
                    .table(SavedProperties::Table)
                    .col(SavedProperties::TenantId)
                    .col(SavedProperties::PropertyId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SavedProperties::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum SavedProperties {
    Table,
    Id,
    TenantId,
    PropertyId,
    CreatedAt,
}
