//! Property entity

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "properties")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub landlord_id: String,

    pub title: String,

    #[sea_orm(nullable)]
    pub description: Option<String>,

    pub address: String,
    pub city: String,

    /// Base monthly price
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price_per_month: Decimal,

    pub bedrooms: i32,
    pub bathrooms: i32,

    /// Cached review aggregate, recomputed on review writes
    pub average_rating: f64,
    pub total_reviews: i32,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::landlord::Entity",
        from = "Column::LandlordId",
        to = "super::landlord::Column::Id"
    )]
    Landlord,
    #[sea_orm(has_many = "super::booking::Entity")]
    Bookings,
    #[sea_orm(has_many = "super::availability_window::Entity")]
    AvailabilityWindows,
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
}

impl Related<super::landlord::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Landlord.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl Related<super::availability_window::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AvailabilityWindows.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
