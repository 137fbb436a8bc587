//! # Period Aggregation
//!
//! Runs extraction over every period window and aggregates the results into
//! [`PeriodAnalytics`].

use crate::domain::entities::analytics::{AnalyticsData, PeriodAnalytics};
use crate::domain::entities::quote_request::QuoteRequest;
use crate::domain::services::period_filter::PeriodWindow;
use crate::domain::services::response_time::{market_submissions, operator_submission};
use crate::domain::value_objects::{OperatorCode, Period, Timestamp};

/// Aggregates `operator`'s response times for one period.
#[must_use]
pub fn operator_period(
    requests: &[QuoteRequest],
    operator: &OperatorCode,
    window: &PeriodWindow,
) -> AnalyticsData {
    AnalyticsData::compute(
        window
            .filter(requests)
            .filter_map(|request| operator_submission(request, operator))
            .collect(),
    )
}

/// Aggregates market-wide response times for one period.
#[must_use]
pub fn market_period(requests: &[QuoteRequest], window: &PeriodWindow) -> AnalyticsData {
    AnalyticsData::compute(window.filter(requests).flat_map(market_submissions).collect())
}

/// Aggregates `operator`'s response times for every period.
///
/// # Examples
///
/// ```
/// use charter_analytics::domain::entities::{OfferBuilder, QuoteRequestBuilder};
/// use charter_analytics::domain::services::aggregation::operator_analytics;
/// use charter_analytics::domain::value_objects::{OperatorCode, Period, RequestCode, Timestamp};
///
/// let now = Timestamp::now();
/// let op = OperatorCode::new("OP1");
/// let request = QuoteRequestBuilder::new(RequestCode::new("QR-1"))
///     .created_at(now.sub_secs(86_400))
///     .offer(OfferBuilder::new(op.clone()).response_time_minutes(25).build())
///     .build();
///
/// let analytics = operator_analytics(&[request], &op, now);
/// assert_eq!(analytics.get(Period::ThreeMonths).average_response_time(), 25);
/// ```
#[must_use]
pub fn operator_analytics(
    requests: &[QuoteRequest],
    operator: &OperatorCode,
    now: Timestamp,
) -> PeriodAnalytics {
    PeriodAnalytics::from_fn(|period: Period| {
        operator_period(requests, operator, &PeriodWindow::new(period, now))
    })
}

/// Aggregates market-wide response times for every period.
#[must_use]
pub fn market_analytics(requests: &[QuoteRequest], now: Timestamp) -> PeriodAnalytics {
    PeriodAnalytics::from_fn(|period: Period| {
        market_period(requests, &PeriodWindow::new(period, now))
    })
}
