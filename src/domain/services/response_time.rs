//! # Response-Time Extraction
//!
//! Turns quote requests into [`Submission`] data points.
//!
//! - Operator scope: at most one data point per request, from the first
//!   offer by that operator, and only if it carries a positive recorded
//!   response time.
//! - Market scope: one data point per offer, from the recorded response time
//!   or, failing that, the offer's `updated_at − created_at`.
//!
//! A request with three offers therefore contributes up to three market
//! samples but at most one operator sample.

use crate::domain::entities::analytics::Submission;
use crate::domain::entities::quote_request::QuoteRequest;
use crate::domain::value_objects::OperatorCode;

/// Returns `operator`'s response time on `request`, if it answered with a
/// positive recorded response time.
#[must_use]
pub fn operator_response_minutes(request: &QuoteRequest, operator: &OperatorCode) -> Option<u64> {
    request
        .offer_from(operator)
        .and_then(|offer| offer.recorded_response_minutes())
}

/// Returns the market response times of every qualifying offer on `request`.
#[must_use]
pub fn market_response_minutes(request: &QuoteRequest) -> Vec<u64> {
    request
        .offers()
        .iter()
        .filter_map(|offer| offer.market_response_minutes())
        .collect()
}

/// Builds `operator`'s data point for `request`.
///
/// Returns `None` when the operator has no offer with a positive recorded
/// response time, so an unanswered request yields no data point rather
/// than one marked `"No response"`.
///
/// # Examples
///
/// ```
/// use charter_analytics::domain::entities::{OfferBuilder, QuoteRequestBuilder};
/// use charter_analytics::domain::services::response_time::operator_submission;
/// use charter_analytics::domain::value_objects::{OperatorCode, RequestCode};
///
/// let op = OperatorCode::new("OP1");
/// let request = QuoteRequestBuilder::new(RequestCode::new("QR-1"))
///     .offer(OfferBuilder::new(op.clone()).response_time_minutes(40).build())
///     .build();
///
/// let submission = operator_submission(&request, &op).unwrap();
/// assert_eq!(submission.response_time_minutes(), 40);
/// assert_eq!(submission.route(), "No route specified");
/// ```
#[must_use]
pub fn operator_submission(request: &QuoteRequest, operator: &OperatorCode) -> Option<Submission> {
    let minutes = operator_response_minutes(request, operator)?;
    Some(Submission::new(
        request.request_code().clone(),
        request.created_at(),
        minutes,
        request.route_description(),
        request.operator_status(operator),
    ))
}

/// Builds one market data point per qualifying offer on `request`.
#[must_use]
pub fn market_submissions(request: &QuoteRequest) -> Vec<Submission> {
    let offers = request.offers();
    if offers.is_empty() {
        return Vec::new();
    }
    let route = request.route_description();
    offers
        .iter()
        .filter_map(|offer| {
            offer.market_response_minutes().map(|minutes| {
                Submission::new(
                    request.request_code().clone(),
                    request.created_at(),
                    minutes,
                    route.clone(),
                    offer.status(),
                )
            })
        })
        .collect()
}
