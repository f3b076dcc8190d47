//! SeaORM entities

pub mod availability_window;
pub mod booking;
pub mod landlord;
pub mod property;
pub mod review;
pub mod saved_property;
pub mod tenant;
pub mod user;
