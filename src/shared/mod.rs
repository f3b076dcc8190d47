pub mod types;
pub mod validations;

pub use types::errors::DomainError;
pub use types::pagination::{PaginatedResult, PaginationParams};
