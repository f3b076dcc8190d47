//! # Rentora
//!
//! Property-rental marketplace backend: listings, availability calendars,
//! bookings with date-conflict detection, reviews gated on completed stays,
//! and saved properties.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, invariants and repository traits
//! - **application**: Business logic services (conflict checking, review
//!   eligibility, identity resolution, calendar management)
//! - **infrastructure**: External concerns (SeaORM database, crypto,
//!   in-memory storage)
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Error taxonomy and pagination types

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::SeaOrmRepositoryProvider;
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
