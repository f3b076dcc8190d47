//! Booking aggregate
//!
//! Contains the Booking entity, the date-range overlap rule, and the
//! repository interface.

pub mod model;
pub mod repository;

pub use model::{ranges_overlap, Booking, BookingStatus};
pub use repository::BookingRepository;
