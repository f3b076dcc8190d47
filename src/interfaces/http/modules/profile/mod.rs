//! Profile module — role-aware profile read/update

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
