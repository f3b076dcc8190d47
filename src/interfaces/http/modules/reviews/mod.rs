//! Review module — eligibility gate, review CRUD, rating aggregate

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
