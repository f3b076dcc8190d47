//! Create bookings table
//!
//! The (property_id, status) index backs the conflict-checker query that
//! scans active bookings for a property.

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
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bookings::PropertyId).string().not_null())
                    .col(ColumnDef::new(Bookings::TenantId).string().not_null())
                    .col(ColumnDef::new(Bookings::CheckInDate).date().not_null())
                    .col(ColumnDef::new(Bookings::CheckOutDate).date().not_null())
                    .col(
                        ColumnDef::new(Bookings::Status)
                            .string_len(20)
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(
                        ColumnDef::new(Bookings::TotalPrice)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bookings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_property")
                            .from(Bookings::Table, Bookings::PropertyId)
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_tenant")
                            .from(Bookings::Table, Bookings::TenantId)
                            .to(Tenants::Table, Tenants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_property_status")
                    .table(Bookings::Table)
                    .col(Bookings::PropertyId)
                    .col(Bookings::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_tenant")
                    .table(Bookings::Table)
                    .col(Bookings::TenantId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Bookings {
    Table,
    Id,
    PropertyId,
    TenantId,
    CheckInDate,
    CheckOutDate,
    Status,
    TotalPrice,
    CreatedAt,
    UpdatedAt,
}
