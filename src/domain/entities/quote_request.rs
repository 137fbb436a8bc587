//! # Quote Request Entity
//!
//! A passenger or agent request for a charter price quote, together with
//! the offers operators have attached to it.
//!
//! Records arrive already validated from the data-access layer; this module
//! only normalizes their loosely-typed fields (see
//! [`deserialize_lenient`](crate::domain::value_objects::timestamp::deserialize_lenient)).
//! A field that is `null` or of the wrong type decodes to its default, and
//! malformed entries in `offers` or `multiCityRoutes` are dropped.
//!
//! # Examples
//!
//! ```
//! use charter_analytics::domain::entities::offer::OfferBuilder;
//! use charter_analytics::domain::entities::quote_request::QuoteRequestBuilder;
//! use charter_analytics::domain::value_objects::{OperatorCode, RequestCode, Routing, Timestamp};
//!
//! let op = OperatorCode::new("OP1");
//! let request = QuoteRequestBuilder::new(RequestCode::new("QR-1001"))
//!     .created_at(Timestamp::from_secs(1_700_000_000).unwrap())
//!     .routing(Routing::new("EGLF", "LFMN"))
//!     .offer(OfferBuilder::new(op.clone()).response_time_minutes(30).build())
//!     .build();
//!
//! assert_eq!(request.route_description(), "EGLF → LFMN");
//! assert_eq!(request.operator_status(&op), "submitted");
//! assert_eq!(request.operator_status(&OperatorCode::new("OP2")), "No response");
//! ```

use crate::domain::entities::offer::Offer;
use crate::domain::value_objects::timestamp::{Timestamp, deserialize_lenient};
use crate::domain::value_objects::{
    OperatorCode, QuoteRequestId, QuoteRequestStatus, RequestCode, Routing,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Route text for a request with no legs.
pub const NO_ROUTE: &str = "No route specified";

/// Status shown when an operator has not answered a request.
pub const NO_RESPONSE: &str = "No response";

/// A charter quote request.
///
/// # Invariants
///
/// - `offers` may be empty.
/// - Requests are independent; they only relate through shared operators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    /// Document identifier.
    #[serde(default, deserialize_with = "crate::domain::value_objects::lenient::or_default")]
    id: QuoteRequestId,
    /// Human-readable reference.
    #[serde(default, deserialize_with = "crate::domain::value_objects::lenient::or_default")]
    request_code: RequestCode,
    /// Submission instant.
    #[serde(default, deserialize_with = "deserialize_lenient")]
    created_at: Option<Timestamp>,
    /// Single-leg routing.
    #[serde(default, deserialize_with = "crate::domain::value_objects::lenient::or_default")]
    routing: Option<Routing>,
    /// Multi-city legs, in flight order.
    #[serde(default, deserialize_with = "crate::domain::value_objects::lenient::skip_invalid")]
    multi_city_routes: Vec<Routing>,
    /// Operator offers, in arrival order.
    #[serde(default, deserialize_with = "crate::domain::value_objects::lenient::skip_invalid")]
    offers: Vec<Offer>,
    /// Lifecycle tag.
    #[serde(default, deserialize_with = "crate::domain::value_objects::lenient::or_default")]
    status: QuoteRequestStatus,
}

impl QuoteRequest {
    /// Returns the document identifier.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &QuoteRequestId {
        &self.id
    }

    /// Returns the human-readable reference.
    #[inline]
    #[must_use]
    pub fn request_code(&self) -> &RequestCode {
        &self.request_code
    }

    /// Returns the submission instant, if known.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Option<Timestamp> {
        self.created_at
    }

    /// Returns the single-leg routing, if any.
    #[inline]
    #[must_use]
    pub fn routing(&self) -> Option<&Routing> {
        self.routing.as_ref()
    }

    /// Returns the multi-city legs.
    #[inline]
    #[must_use]
    pub fn multi_city_routes(&self) -> &[Routing] {
        &self.multi_city_routes
    }

    /// Returns all offers.
    #[inline]
    #[must_use]
    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    /// Returns the lifecycle tag.
    #[inline]
    #[must_use]
    pub fn status(&self) -> &QuoteRequestStatus {
        &self.status
    }

    /// Returns the first offer made by `operator`.
    #[must_use]
    pub fn offer_from(&self, operator: &OperatorCode) -> Option<&Offer> {
        self.offers.iter().find(|offer| offer.is_from(operator))
    }

    /// Renders the route for display.
    ///
    /// Multi-city legs win over the single routing; each leg renders as
    /// `Leg {n}: {dep} → {arr}` and legs are joined with `", "`.
    #[must_use]
    pub fn route_description(&self) -> String {
        if !self.multi_city_routes.is_empty() {
            return self
                .multi_city_routes
                .iter()
                .enumerate()
                .map(|(i, leg)| format!("Leg {}: {}", i + 1, leg))
                .collect::<Vec<_>>()
                .join(", ");
        }
        match &self.routing {
            Some(routing) => routing.to_string(),
            None => NO_ROUTE.to_string(),
        }
    }

    /// Returns the status of `operator`'s offer, or `"No response"`.
    #[must_use]
    pub fn operator_status(&self, operator: &OperatorCode) -> &str {
        self.offer_from(operator)
            .map_or(NO_RESPONSE, |offer| offer.status())
    }
}

impl fmt::Display for QuoteRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "QuoteRequest({} {} offers={})",
            self.request_code,
            self.route_description(),
            self.offers.len()
        )
    }
}

/// Builder for [`QuoteRequest`].
#[derive(Debug, Clone)]
pub struct QuoteRequestBuilder {
    id: Option<QuoteRequestId>,
    request_code: RequestCode,
    created_at: Option<Timestamp>,
    routing: Option<Routing>,
    multi_city_routes: Vec<Routing>,
    offers: Vec<Offer>,
    status: QuoteRequestStatus,
}

impl QuoteRequestBuilder {
    /// Creates a builder with the required reference code.
    #[must_use]
    pub fn new(request_code: RequestCode) -> Self {
        Self {
            id: None,
            request_code,
            created_at: None,
            routing: None,
            multi_city_routes: Vec::new(),
            offers: Vec::new(),
            status: QuoteRequestStatus::default(),
        }
    }

    /// Sets an explicit identifier. A random one is generated otherwise.
    #[must_use]
    pub fn id(mut self, id: QuoteRequestId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the submission instant.
    #[must_use]
    pub fn created_at(mut self, at: Timestamp) -> Self {
        self.created_at = Some(at);
        self
    }

    /// Sets the single-leg routing.
    #[must_use]
    pub fn routing(mut self, routing: Routing) -> Self {
        self.routing = Some(routing);
        self
    }

    /// Appends a multi-city leg.
    #[must_use]
    pub fn leg(mut self, leg: Routing) -> Self {
        self.multi_city_routes.push(leg);
        self
    }

    /// Appends an offer.
    #[must_use]
    pub fn offer(mut self, offer: Offer) -> Self {
        self.offers.push(offer);
        self
    }

    /// Sets the lifecycle tag.
    #[must_use]
    pub fn status(mut self, status: QuoteRequestStatus) -> Self {
        self.status = status;
        self
    }

    /// Builds the request.
    #[must_use]
    pub fn build(self) -> QuoteRequest {
        QuoteRequest {
            id: self.id.unwrap_or_else(QuoteRequestId::generate),
            request_code: self.request_code,
            created_at: self.created_at,
            routing: self.routing,
            multi_city_routes: self.multi_city_routes,
            offers: self.offers,
            status: self.status,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::offer::OfferBuilder;

    fn code(s: &str) -> RequestCode {
        RequestCode::new(s)
    }

    mod route_description {
        use super::*;

        #[test]
        fn single_leg() {
            let request = QuoteRequestBuilder::new(code("QR-1"))
                .routing(Routing::new("KTEB", "KPBI"))
                .build();
            assert_eq!(request.route_description(), "KTEB → KPBI");
        }

        #[test]
        fn multi_city_legs_are_numbered() {
            let request = QuoteRequestBuilder::new(code("QR-2"))
                .routing(Routing::new("IGNORED", "IGNORED"))
                .leg(Routing::new("EGLF", "LFMN"))
                .leg(Routing::new("LFMN", "LSGG"))
                .build();
            assert_eq!(
                request.route_description(),
                "Leg 1: EGLF → LFMN, Leg 2: LFMN → LSGG"
            );
        }

        #[test]
        fn no_route() {
            let request = QuoteRequestBuilder::new(code("QR-3")).build();
            assert_eq!(request.route_description(), NO_ROUTE);
        }
    }

    mod operator_status {
        use super::*;

        #[test]
        fn first_matching_offer_wins() {
            let op = OperatorCode::new("OP1");
            let request = QuoteRequestBuilder::new(code("QR-4"))
                .offer(OfferBuilder::new(OperatorCode::new("OP2")).status("accepted").build())
                .offer(OfferBuilder::new(op.clone()).status("declined").build())
                .offer(OfferBuilder::new(op.clone()).status("accepted").build())
                .build();

            assert_eq!(request.operator_status(&op), "declined");
        }

        #[test]
        fn missing_offer_is_no_response() {
            let request = QuoteRequestBuilder::new(code("QR-5")).build();
            assert_eq!(request.operator_status(&OperatorCode::new("OP1")), NO_RESPONSE);
        }
    }

    mod deserialization {
        use super::*;

        #[test]
        fn document_shape() {
            let json = r#"{
                "id": "doc-1",
                "requestCode": "QR-9",
                "createdAt": {"_seconds": 1700000000, "_nanoseconds": 0},
                "multiCityRoutes": [
                    {"departureAirport": "EGLF", "arrivalAirport": "LFMN"}
                ],
                "offers": [
                    {"operatorUserCode": "OP1", "responseTimeMinutes": 20}
                ],
                "status": "quote-received",
                "passengers": 6
            }"#;
            let request: QuoteRequest = serde_json::from_str(json).unwrap();

            assert_eq!(request.id().as_str(), "doc-1");
            assert_eq!(request.request_code().as_str(), "QR-9");
            assert_eq!(request.created_at().unwrap().timestamp_secs(), 1_700_000_000);
            assert_eq!(request.route_description(), "Leg 1: EGLF → LFMN");
            assert_eq!(request.offers().len(), 1);
            assert_eq!(request.status(), &QuoteRequestStatus::QuoteReceived);
        }

        #[test]
        fn sparse_document() {
            let request: QuoteRequest =
                serde_json::from_str(r#"{"requestCode": "QR-10", "createdAt": null}"#).unwrap();

            assert!(request.created_at().is_none());
            assert!(request.offers().is_empty());
            assert_eq!(request.status(), &QuoteRequestStatus::Pending);
        }

        #[test]
        fn null_collections_decode_empty() {
            let json = r#"{
                "id": "doc-2",
                "requestCode": "QR-14",
                "routing": null,
                "multiCityRoutes": null,
                "offers": null,
                "status": null
            }"#;
            let request: QuoteRequest = serde_json::from_str(json).unwrap();

            assert!(request.offers().is_empty());
            assert!(request.multi_city_routes().is_empty());
            assert_eq!(request.route_description(), NO_ROUTE);
            assert_eq!(request.status(), &QuoteRequestStatus::Pending);
        }

        #[test]
        fn wrong_typed_fields_fall_back() {
            let json = r#"{
                "id": 42,
                "requestCode": "QR-15",
                "routing": "KTEB-KMIA",
                "offers": {"operatorUserCode": "OP1"},
                "status": 3
            }"#;
            let request: QuoteRequest = serde_json::from_str(json).unwrap();

            assert!(request.id().is_empty());
            assert_eq!(request.request_code().as_str(), "QR-15");
            assert!(request.routing().is_none());
            assert!(request.offers().is_empty());
            assert_eq!(request.status(), &QuoteRequestStatus::Pending);
        }

        #[test]
        fn malformed_offers_are_dropped_individually() {
            let json = r#"{
                "requestCode": "QR-16",
                "offers": [
                    null,
                    "OP9",
                    {"operatorUserCode": null, "responseTimeMinutes": 15},
                    {"operatorUserCode": "OP1", "responseTimeMinutes": 20}
                ],
                "multiCityRoutes": [
                    {"departureAirport": "EGLF", "arrivalAirport": 7},
                    false
                ]
            }"#;
            let request: QuoteRequest = serde_json::from_str(json).unwrap();

            assert_eq!(request.offers().len(), 2);
            assert!(request.offers().first().unwrap().operator_user_code().is_empty());
            assert_eq!(request.operator_status(&OperatorCode::new("OP1")), "submitted");
            assert_eq!(request.route_description(), "Leg 1: EGLF → ");
        }

        #[test]
        fn serialize_then_deserialize_preserves_request() {
            let request = QuoteRequestBuilder::new(code("QR-11"))
                .created_at(Timestamp::from_secs(1_700_000_000).unwrap())
                .routing(Routing::new("KTEB", "KMIA"))
                .offer(OfferBuilder::new(OperatorCode::new("OP1")).response_time_minutes(5).build())
                .build();

            let json = serde_json::to_string(&request).unwrap();
            let back: QuoteRequest = serde_json::from_str(&json).unwrap();
            assert_eq!(back, request);
        }
    }

    #[test]
    fn builder_generates_id() {
        let request = QuoteRequestBuilder::new(code("QR-12")).build();
        assert!(!request.id().is_empty());

        let explicit = QuoteRequestBuilder::new(code("QR-13"))
            .id(QuoteRequestId::new("fixed"))
            .build();
        assert_eq!(explicit.id().as_str(), "fixed");
    }
}
