//! Saved properties module — tenant bookmarks

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
