//! # Period Filter
//!
//! Buckets quote requests into look-back windows by submission date.
//!
//! Each bounded window's cutoff is `now` minus 12, 6 or 3 calendar months,
//! computed independently, so windows always nest. Requests without a
//! submission date fall only into [`Period::All`].

use crate::domain::entities::quote_request::QuoteRequest;
use crate::domain::value_objects::{Period, Timestamp};

/// Returns the earliest submission instant that still qualifies for
/// `period`, or `None` for [`Period::All`].
///
/// # Examples
///
/// ```
/// use charter_analytics::domain::services::period_filter::cutoff;
/// use charter_analytics::domain::value_objects::{Period, Timestamp};
///
/// let now = Timestamp::parse("2024-07-15T10:00:00Z").unwrap();
/// assert_eq!(cutoff(Period::All, now), None);
/// assert_eq!(
///     cutoff(Period::ThreeMonths, now).unwrap().to_date_string(),
///     "2024-04-15"
/// );
/// ```
#[must_use]
pub fn cutoff(period: Period, now: Timestamp) -> Option<Timestamp> {
    period.cutoff(now)
}

/// A resolved look-back window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodWindow {
    period: Period,
    cutoff: Option<Timestamp>,
}

impl PeriodWindow {
    /// Resolves `period` against the evaluation instant.
    #[must_use]
    pub fn new(period: Period, now: Timestamp) -> Self {
        Self {
            period,
            cutoff: cutoff(period, now),
        }
    }

    /// Returns the period.
    #[inline]
    #[must_use]
    pub fn period(&self) -> Period {
        self.period
    }

    /// Returns the cutoff, `None` for an unbounded window.
    #[inline]
    #[must_use]
    pub fn cutoff(&self) -> Option<Timestamp> {
        self.cutoff
    }

    /// Returns true if a request submitted at `created_at` falls in the window.
    ///
    /// Bounded windows exclude undated requests. The cutoff itself is inclusive.
    #[must_use]
    pub fn contains(&self, created_at: Option<Timestamp>) -> bool {
        if self.period == Period::All {
            return true;
        }
        match (created_at, self.cutoff) {
            (Some(at), Some(cutoff)) => at >= cutoff,
            // cutoff underflowed the calendar: every dated request is newer
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    /// Returns true if `request` falls in the window.
    #[inline]
    #[must_use]
    pub fn includes(&self, request: &QuoteRequest) -> bool {
        self.contains(request.created_at())
    }

    /// Iterates the requests that fall in the window.
    pub fn filter<'a>(
        &'a self,
        requests: &'a [QuoteRequest],
    ) -> impl Iterator<Item = &'a QuoteRequest> + 'a {
        requests.iter().filter(move |request| self.includes(request))
    }
}
