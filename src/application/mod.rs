//! Application layer — business logic services over the repositories

pub mod services;

pub use services::{AvailabilityService, BookingService, IdentityService, ReviewService};
