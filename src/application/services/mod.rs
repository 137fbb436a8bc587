//! # Application Services
//!
//! - [`ResponseAnalyticsService`]: source-backed, cached analytics
//! - [`AnalyticsCache`]: bounded report memoization

pub mod analytics_cache;
pub mod analytics_service;

pub use analytics_cache::{AnalyticsCache, CacheKey, CacheStats};
pub use analytics_service::ResponseAnalyticsService;
