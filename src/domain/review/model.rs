//! Review domain entity

use chrono::{DateTime, Utc};

use crate::domain::{DomainError, DomainResult};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Tenant review of a completed stay. At most one review per booking.
#[derive(Debug, Clone)]
pub struct Review {
    /// Unique review ID
    pub id: String,
    /// Reviewed property
    pub property_id: String,
    /// Authoring tenant profile
    pub tenant_id: String,
    /// The completed booking this review is for (unique)
    pub booking_id: String,
    /// Star rating, 1..=5
    pub rating: i32,
    pub review_text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn new(
        id: impl Into<String>,
        property_id: impl Into<String>,
        tenant_id: impl Into<String>,
        booking_id: impl Into<String>,
        rating: i32,
        review_text: Option<String>,
    ) -> DomainResult<Self> {
        validate_rating(rating)?;
        let now = Utc::now();
        Ok(Self {
            id: id.into(),
            property_id: property_id.into(),
            tenant_id: tenant_id.into(),
            booking_id: booking_id.into(),
            rating,
            review_text,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn edit(&mut self, rating: i32, review_text: Option<String>) -> DomainResult<()> {
        validate_rating(rating)?;
        self.rating = rating;
        if review_text.is_some() {
            self.review_text = review_text;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

pub fn validate_rating(rating: i32) -> DomainResult<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(DomainError::Validation(format!(
            "rating must be between {} and {}",
            MIN_RATING, MAX_RATING
        )));
    }
    Ok(())
}

/// Arithmetic mean and count over a property's review ratings.
///
/// The empty case yields (0.0, 0), matching the stored defaults of a
/// property that has never been reviewed.
pub fn rating_summary(ratings: &[i32]) -> (f64, i32) {
    if ratings.is_empty() {
        return (0.0, 0);
    }
    let sum: i64 = ratings.iter().map(|&r| r as i64).sum();
    (sum as f64 / ratings.len() as f64, ratings.len() as i32)
}

/// Outcome of the review-eligibility check for (tenant, property)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEligibility {
    pub eligible: bool,
    /// Set when eligible: the completed booking the review will attach to
    pub booking_id: Option<String>,
    /// Set when not eligible: user-facing reason
    pub message: Option<String>,
}

impl ReviewEligibility {
    pub fn eligible(booking_id: impl Into<String>) -> Self {
        Self {
            eligible: true,
            booking_id: Some(booking_id.into()),
            message: None,
        }
    }

    pub fn ineligible(message: impl Into<String>) -> Self {
        Self {
            eligible: false,
            booking_id: None,
            message: Some(message.into()),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds_enforced() {
        assert!(Review::new("r-1", "p-1", "t-1", "b-1", 0, None).is_err());
        assert!(Review::new("r-1", "p-1", "t-1", "b-1", 6, None).is_err());
        for rating in MIN_RATING..=MAX_RATING {
            assert!(Review::new("r-1", "p-1", "t-1", "b-1", rating, None).is_ok());
        }
    }

    #[test]
    fn edit_revalidates_rating() {
        let mut r = Review::new("r-1", "p-1", "t-1", "b-1", 4, None).unwrap();
        assert!(r.edit(9, None).is_err());
        r.edit(2, Some("noisy street".into())).unwrap();
        assert_eq!(r.rating, 2);
        assert_eq!(r.review_text.as_deref(), Some("noisy street"));
    }

    #[test]
    fn summary_of_no_reviews_is_zero() {
        assert_eq!(rating_summary(&[]), (0.0, 0));
    }

    #[test]
    fn summary_of_single_review() {
        assert_eq!(rating_summary(&[4]), (4.0, 1));
    }

    #[test]
    fn summary_of_mixed_ratings() {
        let (avg, count) = rating_summary(&[5, 3, 4, 1, 2]);
        assert_eq!(count, 5);
        assert!((avg - 3.0).abs() < f64::EPSILON);

        let (avg, count) = rating_summary(&[5, 4]);
        assert_eq!(count, 2);
        assert!((avg - 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn eligibility_constructors() {
        let ok = ReviewEligibility::eligible("b-1");
        assert!(ok.eligible);
        assert_eq!(ok.booking_id.as_deref(), Some("b-1"));
        assert!(ok.message.is_none());

        let no = ReviewEligibility::ineligible("No completed bookings found for this property.");
        assert!(!no.eligible);
        assert!(no.booking_id.is_none());
    }
}
