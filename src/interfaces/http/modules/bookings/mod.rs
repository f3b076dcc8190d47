//! Booking module — requests, conflict check, lifecycle transitions

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
