//! Create landlords table

use sea_orm_migration::prelude::*;

use super::m20250601_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Landlords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Landlords::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Landlords::UserId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Landlords::Bio).string())
                    .col(ColumnDef::new(Landlords::BusinessName).string())
                    .col(
                        ColumnDef::new(Landlords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Landlords::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_landlords_user")
                            .from(Landlords::Table, Landlords::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Landlords::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Landlords {
    Table,
    Id,
    UserId,
    Bio,
    BusinessName,
    CreatedAt,
    UpdatedAt,
}
