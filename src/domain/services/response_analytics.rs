//! # Response Analytics Engine
//!
//! Runs the full pipeline for one evaluation: period filtering, extraction,
//! aggregation for the operator and the market, comparison for the selected
//! period, and the trend.
//!
//! The engine is pure: the same requests, operator, period and `as_of`
//! always produce the same [`AnalyticsReport`].
//!
//! # Examples
//!
//! ```
//! use charter_analytics::domain::entities::{OfferBuilder, QuoteRequestBuilder};
//! use charter_analytics::domain::services::response_analytics::ResponseAnalyticsEngine;
//! use charter_analytics::domain::value_objects::{
//!     OperatorCode, PerformanceStatus, Period, RequestCode, Timestamp,
//! };
//!
//! let now = Timestamp::now();
//! let op = OperatorCode::new("OP1");
//! let requests = vec![
//!     QuoteRequestBuilder::new(RequestCode::new("QR-1"))
//!         .created_at(now.sub_secs(3_600))
//!         .offer(OfferBuilder::new(op.clone()).response_time_minutes(20).build())
//!         .offer(OfferBuilder::new(OperatorCode::new("OP2")).response_time_minutes(100).build())
//!         .build(),
//! ];
//!
//! let report = ResponseAnalyticsEngine::default().report(&requests, Some(&op), Period::All, now);
//! assert_eq!(report.comparison().status(), PerformanceStatus::MuchBetter);
//! ```

use crate::domain::entities::analytics::{AnalyticsData, PeriodAnalytics};
use crate::domain::entities::quote_request::QuoteRequest;
use crate::domain::services::aggregation::{market_analytics, operator_analytics};
use crate::domain::services::comparison::{ComparisonThresholds, MarketComparison, trend_with};
use crate::domain::services::formatting::{ResponseTimeBand, format_average, format_response_time};
use crate::domain::value_objects::{OperatorCode, Period, Timestamp, Trend};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything a dashboard needs for one operator (or the whole market).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    as_of: Timestamp,
    selected_period: Period,
    operator: Option<OperatorCode>,
    operator_analytics: Option<PeriodAnalytics>,
    market_analytics: PeriodAnalytics,
    comparison: MarketComparison,
    trend: Trend,
}

impl AnalyticsReport {
    /// Returns the evaluation instant.
    #[inline]
    #[must_use]
    pub fn as_of(&self) -> Timestamp {
        self.as_of
    }

    /// Returns the period the comparison was made for.
    #[inline]
    #[must_use]
    pub fn selected_period(&self) -> Period {
        self.selected_period
    }

    /// Returns the operator analysed, if any.
    #[inline]
    #[must_use]
    pub fn operator(&self) -> Option<&OperatorCode> {
        self.operator.as_ref()
    }

    /// Returns the operator's per-period analytics, if an operator was given.
    #[inline]
    #[must_use]
    pub fn operator_analytics(&self) -> Option<&PeriodAnalytics> {
        self.operator_analytics.as_ref()
    }

    /// Returns the market-wide per-period analytics.
    #[inline]
    #[must_use]
    pub fn market_analytics(&self) -> &PeriodAnalytics {
        &self.market_analytics
    }

    /// Returns the analytics the dashboard is primarily about: the
    /// operator's when one was given, otherwise the market's.
    #[must_use]
    pub fn primary_analytics(&self) -> &PeriodAnalytics {
        self.operator_analytics
            .as_ref()
            .unwrap_or(&self.market_analytics)
    }

    /// Returns the primary aggregate for the selected period.
    #[must_use]
    pub fn selected(&self) -> &AnalyticsData {
        self.primary_analytics().get(self.selected_period)
    }

    /// Returns the market comparison for the selected period.
    #[inline]
    #[must_use]
    pub fn comparison(&self) -> MarketComparison {
        self.comparison
    }

    /// Returns the trend of the primary analytics.
    #[inline]
    #[must_use]
    pub fn trend(&self) -> Trend {
        self.trend
    }

    /// Renders a plain-text dashboard: one line per period, then the
    /// comparison, trend and the selected period's submissions.
    #[must_use]
    pub fn render_text(&self) -> String {
        let subject = self
            .operator
            .as_ref()
            .map_or_else(|| "Market".to_string(), |op| format!("Operator {op}"));
        let mut out = format!(
            "{subject} response times as of {}\n",
            self.as_of.to_iso8601()
        );

        for (period, data) in self.primary_analytics().iter() {
            let marker = if period == self.selected_period { '*' } else { ' ' };
            let average = data.average_response_time();
            let band = if data.has_data() {
                ResponseTimeBand::from_minutes(average).label()
            } else {
                "-"
            };
            out.push_str(&format!(
                "{marker} {:<15} avg {:>8}  submissions {:>5}  {band}\n",
                period.label(),
                format_average(average),
                data.total_submissions(),
            ));
        }

        if self.operator.is_some() {
            out.push_str(&format!(
                "Market ({}): {}\n",
                self.selected_period.label(),
                format_average(self.comparison.market_average())
            ));
            out.push_str(&format!("Comparison: {}\n", self.comparison.describe()));
        }
        out.push_str(&format!("Trend: {}\n", self.trend.describe()));

        let submissions = self.selected().submissions();
        if !submissions.is_empty() {
            out.push_str("\nSubmissions:\n");
            for submission in submissions {
                let date = submission
                    .submitted_date()
                    .map_or_else(|| "unknown".to_string(), |at| at.to_date_string());
                out.push_str(&format!(
                    "  {:<12} {:<10} {:>8}  {}  [{}]\n",
                    submission.request_code().as_str(),
                    date,
                    format_response_time(submission.response_time_minutes()),
                    submission.route(),
                    submission.status(),
                ));
            }
        }
        out
    }
}

impl fmt::Display for AnalyticsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let subject = self
            .operator
            .as_ref()
            .map_or("market", OperatorCode::as_str);
        write!(
            f,
            "Report({} {} {} {} trend={})",
            subject,
            self.selected_period,
            self.selected(),
            self.comparison,
            self.trend
        )
    }
}

/// Stateless pipeline runner.
#[derive(Debug, Clone, Default)]
pub struct ResponseAnalyticsEngine {
    thresholds: ComparisonThresholds,
}

impl ResponseAnalyticsEngine {
    /// Creates an engine with explicit thresholds.
    #[must_use]
    pub fn new(thresholds: ComparisonThresholds) -> Self {
        Self { thresholds }
    }

    /// Returns the configured thresholds.
    #[inline]
    #[must_use]
    pub fn thresholds(&self) -> &ComparisonThresholds {
        &self.thresholds
    }

    /// Builds the report.
    ///
    /// Without an operator the comparison is [`PerformanceStatus::NoData`]
    /// and the trend is computed on the market series.
    ///
    /// [`PerformanceStatus::NoData`]: crate::domain::value_objects::PerformanceStatus::NoData
    #[must_use]
    pub fn report(
        &self,
        requests: &[QuoteRequest],
        operator: Option<&OperatorCode>,
        period: Period,
        as_of: Timestamp,
    ) -> AnalyticsReport {
        let market = market_analytics(requests, as_of);
        let operator_series = operator.map(|op| operator_analytics(requests, op, as_of));

        let market_average = market.get(period).average_response_time();
        let operator_average = operator_series
            .as_ref()
            .map_or(0, |series| series.get(period).average_response_time());
        let comparison =
            MarketComparison::classify_with(operator_average, market_average, &self.thresholds);

        let primary = operator_series.as_ref().unwrap_or(&market);
        let trend = trend_with(
            primary.get(Period::SixMonths).average_response_time(),
            primary.get(Period::ThreeMonths).average_response_time(),
            &self.thresholds,
        );

        AnalyticsReport {
            as_of,
            selected_period: period,
            operator: operator.cloned(),
            operator_analytics: operator_series,
            market_analytics: market,
            comparison,
            trend,
        }
    }
}
