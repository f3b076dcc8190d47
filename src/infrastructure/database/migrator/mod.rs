//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_users;
mod m20250601_000002_create_tenants;
mod m20250601_000003_create_landlords;
mod m20250601_000004_create_properties;
mod m20250601_000005_create_bookings;
mod m20250601_000006_create_availability_windows;
mod m20250601_000007_create_reviews;
mod m20250601_000008_create_saved_properties;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_users::Migration),
            Box::new(m20250601_000002_create_tenants::Migration),
            Box::new(m20250601_000003_create_landlords::Migration),
            Box::new(m20250601_000004_create_properties::Migration),
            Box::new(m20250601_000005_create_bookings::Migration),
            Box::new(m20250601_000006_create_availability_windows::Migration),
            Box::new(m20250601_000007_create_reviews::Migration),
            Box::new(m20250601_000008_create_saved_properties::Migration),
        ]
    }
}
