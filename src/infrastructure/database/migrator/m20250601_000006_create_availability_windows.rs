//! Create availability_windows table

use sea_orm_migration::prelude::*;

use super::m20250601_000004_create_properties::Properties;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AvailabilityWindows::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AvailabilityWindows::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AvailabilityWindows::PropertyId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AvailabilityWindows::StartDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AvailabilityWindows::EndDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AvailabilityWindows::IsAvailable)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(AvailabilityWindows::PriceOverride).decimal_len(10, 2))
                    .col(
                        ColumnDef::new(AvailabilityWindows::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AvailabilityWindows::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_availability_windows_property")
                            .from(
                                AvailabilityWindows::Table,
                                AvailabilityWindows::PropertyId,
                            )
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_availability_windows_property")
                    .table(AvailabilityWindows::Table)
                    .col(AvailabilityWindows::PropertyId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AvailabilityWindows::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum AvailabilityWindows {
    Table,
    Id,
    PropertyId,
    StartDate,
    EndDate,
    IsAvailable,
    PriceOverride,
    CreatedAt,
    UpdatedAt,
}
