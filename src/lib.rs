//! # Charter Analytics
//!
//! Response-time analytics for charter flight quote requests.
//!
//! Given a marketplace's quote requests and the operator offers made on
//! them, the crate computes how quickly an operator responds over four
//! look-back windows (all time, 12, 6 and 3 months), compares that with the
//! market as a whole, and derives a short-term trend.
//!
//! ## Layers
//!
//! - [`domain`]: entities, value objects and the pure analytics engine
//! - [`application`]: the cached, source-backed analytics service
//! - [`infrastructure`]: configuration, telemetry and request sources
//!
//! ## Quick Start
//!
//! ```
//! use charter_analytics::domain::entities::{OfferBuilder, QuoteRequestBuilder};
//! use charter_analytics::domain::services::ResponseAnalyticsEngine;
//! use charter_analytics::domain::value_objects::{OperatorCode, Period, RequestCode, Timestamp};
//!
//! let now = Timestamp::now();
//! let op = OperatorCode::new("OP1");
//! let request = QuoteRequestBuilder::new(RequestCode::new("QR-1"))
//!     .created_at(now.sub_secs(600))
//!     .offer(OfferBuilder::new(op.clone()).response_time_minutes(45).build())
//!     .build();
//!
//! let report = ResponseAnalyticsEngine::default().report(&[request], Some(&op), Period::ThreeMonths, now);
//! assert_eq!(report.selected().average_response_time(), 45);
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
