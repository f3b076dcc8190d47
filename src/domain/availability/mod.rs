//! Availability window aggregate

pub mod model;
pub mod repository;

pub use model::{validate_price_override, validate_range, AvailabilityWindow, PriceOverrideUpdate};
pub use repository::AvailabilityRepository;
