//! Saved property aggregate

pub mod model;
pub mod repository;

pub use model::SavedProperty;
pub use repository::SavedPropertyRepository;
