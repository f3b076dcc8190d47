//! Create properties table

use sea_orm_migration::prelude::*;

use super::m20250601_000003_create_landlords::Landlords;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Properties::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Properties::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Properties::LandlordId).string().not_null())
                    .col(ColumnDef::new(Properties::Title).string().not_null())
                    .col(ColumnDef::new(Properties::Description).string())
                    .col(ColumnDef::new(Properties::Address).string().not_null())
                    .col(ColumnDef::new(Properties::City).string().not_null())
                    .col(
                        ColumnDef::new(Properties::PricePerMonth)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Properties::Bedrooms)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Properties::Bathrooms)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Properties::AverageRating)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Properties::TotalReviews)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Properties::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Properties::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Properties::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_properties_landlord")
                            .from(Properties::Table, Properties::LandlordId)
                            .to(Landlords::Table, Landlords::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_properties_landlord")
                    .table(Properties::Table)
                    .col(Properties::LandlordId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_properties_city")
                    .table(Properties::Table)
                    .col(Properties::City)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Properties::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Properties {
    Table,
    Id,
    LandlordId,
    Title,
    Description,
    Address,
    City,
    PricePerMonth,
    Bedrooms,
    Bathrooms,
    AverageRating,
    TotalReviews,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
