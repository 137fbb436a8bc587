//! # Response Analytics Service
//!
//! Loads quote requests from a [`QuoteRequestSource`], runs the
//! [`ResponseAnalyticsEngine`] and memoizes the result.
//!
//! # Examples
//!
//! ```
//! use charter_analytics::application::services::ResponseAnalyticsService;
//! use charter_analytics::domain::value_objects::Period;
//! use charter_analytics::infrastructure::config::AnalyticsConfig;
//! use charter_analytics::infrastructure::persistence::in_memory::InMemoryQuoteRequestSource;
//! use std::sync::Arc;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let source = Arc::new(InMemoryQuoteRequestSource::new());
//! let service = ResponseAnalyticsService::new(source, &AnalyticsConfig::default());
//! let report = service.market_report(Period::All).await.unwrap();
//! assert!(!report.selected().has_data());
//! # });
//! ```

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::analytics_cache::{AnalyticsCache, CacheKey, CacheStats};
use crate::domain::services::comparison::ComparisonThresholds;
use crate::domain::services::response_analytics::{AnalyticsReport, ResponseAnalyticsEngine};
use crate::domain::value_objects::{OperatorCode, Period, Timestamp};
use crate::infrastructure::config::AnalyticsConfig;
use crate::infrastructure::persistence::traits::QuoteRequestSource;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Cached, source-backed analytics.
#[derive(Debug)]
pub struct ResponseAnalyticsService {
    source: Arc<dyn QuoteRequestSource>,
    engine: ResponseAnalyticsEngine,
    cache: AnalyticsCache,
}

impl ResponseAnalyticsService {
    /// Creates a service from loaded configuration.
    #[must_use]
    pub fn new(source: Arc<dyn QuoteRequestSource>, config: &AnalyticsConfig) -> Self {
        Self {
            source,
            engine: ResponseAnalyticsEngine::new(config.thresholds),
            cache: AnalyticsCache::new(config.cache_capacity),
        }
    }

    /// Creates a service from configuration loaded from `config_path` (if
    /// given) and the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Configuration`] if the settings cannot be
    /// read or fail validation.
    pub fn load(
        source: Arc<dyn QuoteRequestSource>,
        config_path: Option<&Path>,
    ) -> ApplicationResult<Self> {
        let config = AnalyticsConfig::load(config_path)?;
        debug!(?config, "configuration loaded");
        Ok(Self::new(source, &config))
    }

    /// Creates a service with default configuration.
    #[must_use]
    pub fn with_defaults(source: Arc<dyn QuoteRequestSource>) -> Self {
        Self::new(source, &AnalyticsConfig::default())
    }

    /// Returns the thresholds in use.
    #[must_use]
    pub fn thresholds(&self) -> &ComparisonThresholds {
        self.engine.thresholds()
    }

    /// Builds the report for `operator` (or the market when `None`) as of `as_of`.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Validation`] for a blank operator code
    /// and [`ApplicationError::Repository`] if the source fails.
    #[instrument(skip(self, operator, period), fields(operator = ?operator.map(OperatorCode::as_str), period = %period))]
    pub async fn report(
        &self,
        operator: Option<&OperatorCode>,
        period: Period,
        as_of: Timestamp,
    ) -> ApplicationResult<Arc<AnalyticsReport>> {
        if operator.is_some_and(|op| op.as_str().trim().is_empty()) {
            return Err(ApplicationError::validation("operator code must not be empty"));
        }

        let requests = self.source.find_all().await?;
        debug!(requests = requests.len(), "loaded quote requests");

        let key = CacheKey::new(&requests, operator, period, as_of);
        let report = self
            .cache
            .get_or_insert_with(key, || self.engine.report(&requests, operator, period, as_of));

        info!(
            average = report.selected().average_response_time(),
            submissions = report.selected().total_submissions(),
            status = %report.comparison().status(),
            trend = %report.trend(),
            "response analytics computed"
        );
        Ok(report)
    }

    /// Builds `operator`'s report as of the current minute.
    ///
    /// The evaluation instant is truncated to the minute so that repeated
    /// calls on unchanged data share a cache entry.
    ///
    /// # Errors
    ///
    /// See [`report`](Self::report).
    pub async fn operator_report(
        &self,
        operator: &OperatorCode,
        period: Period,
    ) -> ApplicationResult<Arc<AnalyticsReport>> {
        self.report(Some(operator), period, Timestamp::now().truncate_to_minute())
            .await
    }

    /// Builds the market-only report as of the current minute.
    ///
    /// # Errors
    ///
    /// See [`report`](Self::report).
    pub async fn market_report(&self, period: Period) -> ApplicationResult<Arc<AnalyticsReport>> {
        self.report(None, period, Timestamp::now().truncate_to_minute())
            .await
    }

    /// Serializes a report as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Serialization`] if encoding fails.
    pub fn to_json(report: &AnalyticsReport) -> ApplicationResult<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    /// Drops every cached report.
    pub fn invalidate_cache(&self) {
        self.cache.clear();
    }

    /// Returns cache counters.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
