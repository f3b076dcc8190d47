//! Review aggregate
//!
//! Contains the Review entity, the rating aggregate, the eligibility result
//! type, and the repository interface.

pub mod model;
pub mod repository;

pub use model::{
    rating_summary, validate_rating, Review, ReviewEligibility, MAX_RATING, MIN_RATING,
};
pub use repository::ReviewRepository;
