//! # Domain Services
//!
//! The analytics pipeline, stage by stage:
//!
//! 1. [`period_filter`]: which requests fall inside a look-back window
//! 2. [`response_time`]: operator and market data points per request
//! 3. [`aggregation`]: per-period averages and sorted submissions
//! 4. [`comparison`]: market classification and trend
//!
//! [`response_analytics::ResponseAnalyticsEngine`] runs all four.
//! [`formatting`] holds the display helpers shared by every consumer.

pub mod aggregation;
pub mod comparison;
pub mod formatting;
pub mod period_filter;
pub mod response_analytics;
pub mod response_time;

pub use comparison::{ComparisonThresholds, MarketComparison};
pub use formatting::{ResponseTimeBand, format_average, format_response_time};
pub use period_filter::PeriodWindow;
pub use response_analytics::{AnalyticsReport, ResponseAnalyticsEngine};
