//! Property module — listings CRUD and search

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
