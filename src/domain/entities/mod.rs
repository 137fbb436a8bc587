//! # Domain Entities
//!
//! ## Source Records
//!
//! - [`QuoteRequest`]: a charter quote request with its offers
//! - [`Offer`]: one operator's response
//!
//! ## Derived
//!
//! - [`AnalyticsData`]: per-period response-time aggregate
//! - [`PeriodAnalytics`]: one aggregate per period

pub mod analytics;
pub mod offer;
pub mod quote_request;

pub use analytics::{AnalyticsData, PeriodAnalytics, Submission};
pub use offer::{DEFAULT_OFFER_STATUS, Offer, OfferBuilder};
pub use quote_request::{NO_RESPONSE, NO_ROUTE, QuoteRequest, QuoteRequestBuilder};
