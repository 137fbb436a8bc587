//! # Response-Time Analytics Entities
//!
//! Derived, never persisted aggregates over quote-request response times.
//!
//! This module provides the [`Submission`] data point, the per-period
//! [`AnalyticsData`] aggregate and [`PeriodAnalytics`], one aggregate for
//! each [`Period`].
//!
//! # Examples
//!
//! ```
//! use charter_analytics::domain::entities::analytics::{AnalyticsData, Submission};
//! use charter_analytics::domain::value_objects::{RequestCode, Timestamp};
//!
//! let at = Timestamp::from_secs(1_700_000_000).unwrap();
//! let data = AnalyticsData::compute(vec![
//!     Submission::new(RequestCode::new("QR-1"), Some(at), 30, "A → B", "submitted"),
//!     Submission::new(RequestCode::new("QR-2"), Some(at.add_secs(60)), 61, "A → C", "accepted"),
//! ]);
//!
//! assert_eq!(data.average_response_time(), 46);
//! assert_eq!(data.total_submissions(), 2);
//! assert_eq!(data.submissions()[0].request_code().as_str(), "QR-2");
//! ```

use crate::domain::value_objects::{Period, RequestCode, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One response-time data point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// Reference of the quote request answered.
    request_code: RequestCode,
    /// When the quote request was submitted.
    submitted_date: Option<Timestamp>,
    /// Response latency in minutes, always positive.
    #[serde(rename = "responseTime")]
    response_time_minutes: u64,
    /// Rendered route of the request.
    route: String,
    /// Status of the answering offer, `"submitted"` when none was recorded.
    ///
    /// Only answered offers become submissions, so the `"No response"` text
    /// of [`QuoteRequest::operator_status`] never appears here.
    ///
    /// [`QuoteRequest::operator_status`]: crate::domain::entities::QuoteRequest::operator_status
    status: String,
}

impl Submission {
    /// Creates a data point.
    #[must_use]
    pub fn new(
        request_code: RequestCode,
        submitted_date: Option<Timestamp>,
        response_time_minutes: u64,
        route: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            request_code,
            submitted_date,
            response_time_minutes,
            route: route.into(),
            status: status.into(),
        }
    }

    /// Returns the request reference.
    #[inline]
    #[must_use]
    pub fn request_code(&self) -> &RequestCode {
        &self.request_code
    }

    /// Returns the request submission instant, if known.
    #[inline]
    #[must_use]
    pub fn submitted_date(&self) -> Option<Timestamp> {
        self.submitted_date
    }

    /// Returns the response latency in minutes.
    #[inline]
    #[must_use]
    pub fn response_time_minutes(&self) -> u64 {
        self.response_time_minutes
    }

    /// Returns the rendered route.
    #[inline]
    #[must_use]
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Returns the status text.
    #[inline]
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }
}

/// Aggregate response-time statistics for one period.
///
/// # Invariants
///
/// - `average_response_time == round(sum / total_submissions)`, or 0 when
///   there are no submissions.
/// - `submissions` is ordered newest first; entries without a submission
///   date come last.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsData {
    /// Mean response time in whole minutes.
    average_response_time: u64,
    /// Number of data points behind the mean.
    total_submissions: u64,
    /// Data points, newest first.
    submissions: Vec<Submission>,
}

impl AnalyticsData {
    /// Aggregates a set of data points.
    #[must_use]
    pub fn compute(mut submissions: Vec<Submission>) -> Self {
        submissions.sort_by(|a, b| b.submitted_date.cmp(&a.submitted_date));

        let total_submissions = submissions.len() as u64;
        let sum = submissions
            .iter()
            .fold(0u64, |acc, s| acc.saturating_add(s.response_time_minutes));

        Self {
            average_response_time: rounded_mean(sum, total_submissions),
            total_submissions,
            submissions,
        }
    }

    /// Returns an aggregate with no data.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the mean response time in minutes (0 without data).
    #[inline]
    #[must_use]
    pub fn average_response_time(&self) -> u64 {
        self.average_response_time
    }

    /// Returns the number of data points.
    #[inline]
    #[must_use]
    pub fn total_submissions(&self) -> u64 {
        self.total_submissions
    }

    /// Returns the data points, newest first.
    #[inline]
    #[must_use]
    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    /// Returns true if the period has at least one data point.
    #[inline]
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.total_submissions > 0
    }
}

impl fmt::Display for AnalyticsData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Analytics(avg={}m submissions={})",
            self.average_response_time, self.total_submissions
        )
    }
}

fn rounded_mean(sum: u64, count: u64) -> u64 {
    if count == 0 {
        return 0;
    }
    (sum as f64 / count as f64).round() as u64
}

/// One [`AnalyticsData`] per [`Period`].
///
/// Serializes as an object keyed by period code (`all`, `12m`, `6m`, `3m`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PeriodAnalytics {
    #[serde(rename = "all")]
    all: AnalyticsData,
    #[serde(rename = "12m")]
    twelve_months: AnalyticsData,
    #[serde(rename = "6m")]
    six_months: AnalyticsData,
    #[serde(rename = "3m")]
    three_months: AnalyticsData,
}

impl PeriodAnalytics {
    /// Builds the record by evaluating `compute` once per period.
    #[must_use]
    pub fn from_fn(mut compute: impl FnMut(Period) -> AnalyticsData) -> Self {
        Self {
            all: compute(Period::All),
            twelve_months: compute(Period::TwelveMonths),
            six_months: compute(Period::SixMonths),
            three_months: compute(Period::ThreeMonths),
        }
    }

    /// Returns the aggregate for `period`.
    #[must_use]
    pub fn get(&self, period: Period) -> &AnalyticsData {
        match period {
            Period::All => &self.all,
            Period::TwelveMonths => &self.twelve_months,
            Period::SixMonths => &self.six_months,
            Period::ThreeMonths => &self.three_months,
        }
    }

    /// Iterates `(period, aggregate)` pairs, widest period first.
    pub fn iter(&self) -> impl Iterator<Item = (Period, &AnalyticsData)> {
        Period::ALL.into_iter().map(move |period| (period, self.get(period)))
    }
}

impl std::ops::Index<Period> for PeriodAnalytics {
    type Output = AnalyticsData;

    fn index(&self, period: Period) -> &Self::Output {
        self.get(period)
    }
}
