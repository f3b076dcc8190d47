//! Booking domain entity

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

/// Booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    /// Requested by the tenant, awaiting landlord action
    Pending,
    /// Accepted by the landlord
    Accepted,
    /// Confirmed (payment settled)
    Confirmed,
    /// Stay finished
    Completed,
    /// Rejected by the landlord
    Rejected,
    /// Cancelled by the tenant or system
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Confirmed => "CONFIRMED",
            Self::Completed => "COMPLETED",
            Self::Rejected => "REJECTED",
            Self::Cancelled => "CANCELLED",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "PENDING" => Self::Pending,
            "ACCEPTED" => Self::Accepted,
            "CONFIRMED" => Self::Confirmed,
            "COMPLETED" => Self::Completed,
            "REJECTED" => Self::Rejected,
            _ => Self::Cancelled,
        }
    }

    /// Statuses that hold the dates against other booking requests.
    pub fn active() -> [BookingStatus; 3] {
        [Self::Pending, Self::Accepted, Self::Confirmed]
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Accepted | Self::Confirmed)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Half-open range overlap: [a_in, a_out) intersects [b_in, b_out).
///
/// Strict inequalities on both sides, so a checkout day equal to the next
/// checkin day does not conflict.
pub fn ranges_overlap(
    a_in: NaiveDate,
    a_out: NaiveDate,
    b_in: NaiveDate,
    b_out: NaiveDate,
) -> bool {
    a_in < b_out && a_out > b_in
}

/// Tenant booking of a property for a half-open date range [check_in, check_out)
#[derive(Debug, Clone)]
pub struct Booking {
    /// Unique booking ID
    pub id: String,
    /// Booked property
    pub property_id: String,
    /// Owning tenant profile
    pub tenant_id: String,
    /// First night of the stay
    pub check_in_date: NaiveDate,
    /// Checkout day (not slept)
    pub check_out_date: NaiveDate,
    /// Current status
    pub status: BookingStatus,
    /// Total price for the stay
    pub total_price: Decimal,
    /// When the booking was requested
    pub created_at: DateTime<Utc>,
    /// Last modification
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(
        id: impl Into<String>,
        property_id: impl Into<String>,
        tenant_id: impl Into<String>,
        check_in_date: NaiveDate,
        check_out_date: NaiveDate,
        total_price: Decimal,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            property_id: property_id.into(),
            tenant_id: tenant_id.into(),
            check_in_date,
            check_out_date,
            status: BookingStatus::Pending,
            total_price,
            created_at: now,
            updated_at: now,
        }
    }

    /// Number of nights in the stay
    pub fn nights(&self) -> i64 {
        (self.check_out_date - self.check_in_date).num_days()
    }

    /// Whether this booking's range intersects the candidate range
    pub fn overlaps(&self, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        ranges_overlap(self.check_in_date, self.check_out_date, check_in, check_out)
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn is_completed(&self) -> bool {
        self.status == BookingStatus::Completed
    }

    fn set_status(&mut self, status: BookingStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    pub fn accept(&mut self) {
        self.set_status(BookingStatus::Accepted);
    }

    pub fn confirm(&mut self) {
        self.set_status(BookingStatus::Confirmed);
    }

    pub fn complete(&mut self) {
        self.set_status(BookingStatus::Completed);
    }

    pub fn reject(&mut self) {
        self.set_status(BookingStatus::Rejected);
    }

    pub fn cancel(&mut self) {
        self.set_status(BookingStatus::Cancelled);
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_booking(check_in: &str, check_out: &str) -> Booking {
        Booking::new(
            "b-1",
            "prop-1",
            "tenant-1",
            d(check_in),
            d(check_out),
            Decimal::new(70000, 2),
        )
    }

    #[test]
    fn new_booking_is_pending_and_active() {
        let b = sample_booking("2026-01-10", "2026-01-17");
        assert_eq!(b.status, BookingStatus::Pending);
        assert!(b.is_active());
        assert_eq!(b.nights(), 7);
    }

    #[test]
    fn back_to_back_stays_do_not_overlap() {
        let b = sample_booking("2026-01-10", "2026-01-17");
        assert!(!b.overlaps(d("2026-01-17"), d("2026-01-24")));
        assert!(!b.overlaps(d("2026-01-03"), d("2026-01-10")));
    }

    #[test]
    fn partial_overlap_is_detected() {
        let b = sample_booking("2026-01-10", "2026-01-17");
        assert!(b.overlaps(d("2026-01-16"), d("2026-01-18")));
        assert!(b.overlaps(d("2026-01-05"), d("2026-01-11")));
    }

    #[test]
    fn containing_range_overlaps() {
        let b = sample_booking("2026-01-10", "2026-01-17");
        assert!(b.overlaps(d("2026-01-01"), d("2026-01-31")));
        assert!(b.overlaps(d("2026-01-12"), d("2026-01-14")));
    }

    #[test]
    fn zero_length_candidate_never_overlaps() {
        let b = sample_booking("2026-01-10", "2026-01-17");
        assert!(!b.overlaps(d("2026-01-12"), d("2026-01-12")));
    }

    #[test]
    fn overlap_is_symmetric() {
        let cases = [
            ("2026-01-10", "2026-01-17", "2026-01-16", "2026-01-18"),
            ("2026-01-10", "2026-01-17", "2026-01-17", "2026-01-24"),
            ("2026-02-05", "2026-02-12", "2026-02-01", "2026-02-10"),
        ];
        for (a_in, a_out, b_in, b_out) in cases {
            assert_eq!(
                ranges_overlap(d(a_in), d(a_out), d(b_in), d(b_out)),
                ranges_overlap(d(b_in), d(b_out), d(a_in), d(a_out)),
            );
        }
    }

    #[test]
    fn active_statuses_hold_dates() {
        for status in BookingStatus::active() {
            assert!(status.is_active());
        }
        assert!(!BookingStatus::Completed.is_active());
        assert!(!BookingStatus::Rejected.is_active());
        assert!(!BookingStatus::Cancelled.is_active());
    }

    #[test]
    fn lifecycle_transitions_update_status() {
        let mut b = sample_booking("2026-01-10", "2026-01-17");
        b.accept();
        assert_eq!(b.status, BookingStatus::Accepted);
        b.confirm();
        assert_eq!(b.status, BookingStatus::Confirmed);
        b.complete();
        assert_eq!(b.status, BookingStatus::Completed);
        assert!(b.is_completed());
        assert!(!b.is_active());
    }

    #[test]
    fn status_display_roundtrip() {
        for status in &[
            BookingStatus::Pending,
            BookingStatus::Accepted,
            BookingStatus::Confirmed,
            BookingStatus::Completed,
            BookingStatus::Rejected,
            BookingStatus::Cancelled,
        ] {
            let s = status.as_str();
            let parsed = BookingStatus::from_str(s);
            assert_eq!(&parsed, status);
        }
    }

    #[test]
    fn unknown_status_defaults_to_cancelled() {
        assert_eq!(BookingStatus::from_str("GARBAGE"), BookingStatus::Cancelled);
    }
}
