//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`QuoteRequestId`], [`RequestCode`], [`OperatorCode`]: string-backed identifiers
//!
//! ## Time
//!
//! - [`Timestamp`]: UTC instant
//! - [`RawTimestamp`]: the loosely-typed shapes timestamps arrive in
//!
//! ## Domain Enums
//!
//! - [`Period`]: look-back windows (all, 12m, 6m, 3m)
//! - [`PerformanceStatus`], [`Trend`]: market comparison outcomes
//! - [`QuoteRequestStatus`]: request lifecycle tag

pub mod enums;
pub mod ids;
pub(crate) mod lenient;
pub mod route;
pub mod timestamp;

pub use enums::{ParseEnumError, PerformanceStatus, Period, QuoteRequestStatus, Trend};
pub use ids::{OperatorCode, QuoteRequestId, RequestCode};
pub use route::Routing;
pub use timestamp::{RawTimestamp, Timestamp};
