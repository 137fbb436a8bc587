//! # Market Comparison
//!
//! Classifies an operator's average response time against the market
//! average and derives a short-term trend.
//!
//! Lower response times are better throughout.
//!
//! # Trend approximation
//!
//! The "previous three months" average is implied as
//! `six_month_avg − three_month_avg`, a difference of two independently
//! computed means rather than a mean over the prior window. It is kept as
//! is; see `tests::trend_tests::implied_previous_average_can_mislead`.

use crate::domain::value_objects::{PerformanceStatus, Trend};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default band, in percent, within which the operator counts as similar.
pub const DEFAULT_SIMILAR_PCT: u32 = 10;

/// Default difference, in percent, at which better/worse becomes much-better/much-worse.
pub const DEFAULT_SIGNIFICANT_PCT: u32 = 30;

/// Default change, in percent, below which the trend is stable.
pub const DEFAULT_TREND_STABLE_PCT: f64 = 5.0;

/// Classification thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonThresholds {
    /// `|diff| <= similar_pct` classifies as similar.
    pub similar_pct: u32,
    /// `|diff| >= significant_pct` classifies as much better or much worse.
    pub significant_pct: u32,
    /// `|change| < trend_stable_pct` classifies the trend as stable.
    pub trend_stable_pct: f64,
}

impl Default for ComparisonThresholds {
    fn default() -> Self {
        Self {
            similar_pct: DEFAULT_SIMILAR_PCT,
            significant_pct: DEFAULT_SIGNIFICANT_PCT,
            trend_stable_pct: DEFAULT_TREND_STABLE_PCT,
        }
    }
}

/// Outcome of comparing an operator's average response time to the market's.
///
/// # Examples
///
/// ```
/// use charter_analytics::domain::services::comparison::MarketComparison;
/// use charter_analytics::domain::value_objects::PerformanceStatus;
///
/// let cmp = MarketComparison::classify(69, 100);
/// assert_eq!(cmp.status(), PerformanceStatus::MuchBetter);
/// assert_eq!(cmp.percentage_diff(), -31);
///
/// assert_eq!(MarketComparison::classify(50, 0).status(), PerformanceStatus::NoData);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketComparison {
    status: PerformanceStatus,
    /// Signed percentage difference, negative when the operator is faster.
    percentage_diff: i64,
    operator_average: u64,
    market_average: u64,
}

impl MarketComparison {
    /// Classifies with the default thresholds.
    #[must_use]
    pub fn classify(operator_average: u64, market_average: u64) -> Self {
        Self::classify_with(operator_average, market_average, &ComparisonThresholds::default())
    }

    /// Classifies with explicit thresholds.
    #[must_use]
    pub fn classify_with(
        operator_average: u64,
        market_average: u64,
        thresholds: &ComparisonThresholds,
    ) -> Self {
        if operator_average == 0 || market_average == 0 {
            return Self {
                status: PerformanceStatus::NoData,
                percentage_diff: 0,
                operator_average,
                market_average,
            };
        }

        let op = operator_average as f64;
        let market = market_average as f64;
        let percentage_diff = round_half_up((op - market) / market * 100.0) as i64;
        let is_better = operator_average < market_average;
        let magnitude = percentage_diff.unsigned_abs();

        let status = if magnitude <= u64::from(thresholds.similar_pct) {
            PerformanceStatus::Similar
        } else if is_better {
            if magnitude >= u64::from(thresholds.significant_pct) {
                PerformanceStatus::MuchBetter
            } else {
                PerformanceStatus::Better
            }
        } else if magnitude >= u64::from(thresholds.significant_pct) {
            PerformanceStatus::MuchWorse
        } else {
            PerformanceStatus::Worse
        };

        Self {
            status,
            percentage_diff,
            operator_average,
            market_average,
        }
    }

    /// Returns the classification.
    #[inline]
    #[must_use]
    pub fn status(&self) -> PerformanceStatus {
        self.status
    }

    /// Returns the signed percentage difference (negative = faster).
    #[inline]
    #[must_use]
    pub fn percentage_diff(&self) -> i64 {
        self.percentage_diff
    }

    /// Returns the operator average the comparison was made with.
    #[inline]
    #[must_use]
    pub fn operator_average(&self) -> u64 {
        self.operator_average
    }

    /// Returns the market average the comparison was made with.
    #[inline]
    #[must_use]
    pub fn market_average(&self) -> u64 {
        self.market_average
    }

    /// Returns narrative text such as `"25% faster than market"`.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.status {
            PerformanceStatus::NoData => "Not enough data to compare".to_string(),
            PerformanceStatus::Similar => "On par with market".to_string(),
            _ if self.percentage_diff < 0 => {
                format!("{}% faster than market", self.percentage_diff.unsigned_abs())
            }
            _ => format!("{}% slower than market", self.percentage_diff),
        }
    }
}

impl fmt::Display for MarketComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:+}%)", self.status, self.percentage_diff)
    }
}

/// Derives the trend with the default stability threshold.
///
/// # Examples
///
/// ```
/// use charter_analytics::domain::services::comparison::trend;
/// use charter_analytics::domain::value_objects::Trend;
///
/// // implied previous = 100 - 40 = 60; change = -33%: faster, so improving
/// assert_eq!(trend(100, 40), Trend::Up);
/// assert_eq!(trend(0, 40), Trend::Stable);
/// ```
#[must_use]
pub fn trend(six_month_average: u64, three_month_average: u64) -> Trend {
    trend_with(
        six_month_average,
        three_month_average,
        &ComparisonThresholds::default(),
    )
}

/// Returns the implied previous-three-months average.
///
/// This is `six_month_average − three_month_average` and may be zero or
/// negative.
#[must_use]
pub fn implied_previous_average(six_month_average: u64, three_month_average: u64) -> i64 {
    to_i64(six_month_average).saturating_sub(to_i64(three_month_average))
}

/// Derives the trend with explicit thresholds.
#[must_use]
pub fn trend_with(
    six_month_average: u64,
    three_month_average: u64,
    thresholds: &ComparisonThresholds,
) -> Trend {
    let current = to_i64(three_month_average);
    let previous = implied_previous_average(six_month_average, three_month_average);
    if current == 0 || previous == 0 {
        return Trend::Stable;
    }

    let change = (current - previous) as f64 / previous as f64 * 100.0;
    if change.abs() < thresholds.trend_stable_pct {
        Trend::Stable
    } else if change < 0.0 {
        Trend::Up
    } else {
        Trend::Down
    }
}

/// Rounds halves toward positive infinity.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod classification_tests {
        use super::*;

        #[test]
        fn equal_averages_are_similar() {
            let cmp = MarketComparison::classify(100, 100);
            assert_eq!(cmp.status(), PerformanceStatus::Similar);
            assert_eq!(cmp.percentage_diff(), 0);
        }

        #[test]
        fn boundary_cases() {
            assert_eq!(MarketComparison::classify(69, 100).status(), PerformanceStatus::MuchBetter);
            assert_eq!(MarketComparison::classify(131, 100).status(), PerformanceStatus::MuchWorse);
            assert_eq!(MarketComparison::classify(89, 100).status(), PerformanceStatus::Better);
            assert_eq!(MarketComparison::classify(111, 100).status(), PerformanceStatus::Worse);
        }

        #[test]
        fn ten_percent_is_still_similar() {
            assert_eq!(MarketComparison::classify(90, 100).status(), PerformanceStatus::Similar);
            assert_eq!(MarketComparison::classify(110, 100).status(), PerformanceStatus::Similar);
        }

        #[test]
        fn thirty_percent_is_significant() {
            assert_eq!(MarketComparison::classify(70, 100).status(), PerformanceStatus::MuchBetter);
            assert_eq!(MarketComparison::classify(130, 100).status(), PerformanceStatus::MuchWorse);
            assert_eq!(MarketComparison::classify(71, 100).status(), PerformanceStatus::Better);
        }

        #[test]
        fn halves_round_toward_positive_infinity() {
            // -10.5% rounds to -10: similar, not better
            let cmp = MarketComparison::classify(179, 200);
            assert_eq!(cmp.percentage_diff(), -10);
            assert_eq!(cmp.status(), PerformanceStatus::Similar);

            // +10.5% rounds to +11: worse
            let cmp = MarketComparison::classify(221, 200);
            assert_eq!(cmp.percentage_diff(), 11);
            assert_eq!(cmp.status(), PerformanceStatus::Worse);
        }

        #[test]
        fn zero_market_average_is_no_data() {
            for op in [0, 1, 100, 10_000] {
                let cmp = MarketComparison::classify(op, 0);
                assert_eq!(cmp.status(), PerformanceStatus::NoData);
            }
        }

        #[test]
        fn zero_operator_average_is_no_data() {
            assert_eq!(MarketComparison::classify(0, 100).status(), PerformanceStatus::NoData);
        }

        #[test]
        fn custom_thresholds() {
            let strict = ComparisonThresholds {
                similar_pct: 2,
                significant_pct: 5,
                ..ComparisonThresholds::default()
            };
            assert_eq!(
                MarketComparison::classify_with(96, 100, &strict).status(),
                PerformanceStatus::Better
            );
            assert_eq!(
                MarketComparison::classify_with(95, 100, &strict).status(),
                PerformanceStatus::MuchBetter
            );
        }

        #[test]
        fn narrative() {
            assert_eq!(MarketComparison::classify(75, 100).describe(), "25% faster than market");
            assert_eq!(MarketComparison::classify(150, 100).describe(), "50% slower than market");
            assert_eq!(MarketComparison::classify(100, 100).describe(), "On par with market");
            assert_eq!(MarketComparison::classify(0, 100).describe(), "Not enough data to compare");
            assert_eq!(MarketComparison::classify(75, 100).to_string(), "better (-25%)");
        }
    }

    mod trend_tests {
        use super::*;

        #[test]
        fn zero_operands_are_stable() {
            assert_eq!(trend(0, 0), Trend::Stable);
            assert_eq!(trend(50, 0), Trend::Stable);
            // previous = 50 - 50 = 0
            assert_eq!(trend(50, 50), Trend::Stable);
        }

        #[test]
        fn faster_recent_is_up() {
            // previous = 150 - 50 = 100, change = -50%
            assert_eq!(trend(150, 50), Trend::Up);
        }

        #[test]
        fn slower_recent_is_down() {
            // previous = 150 - 90 = 60, change = +50%
            assert_eq!(trend(150, 90), Trend::Down);
        }

        #[test]
        fn small_change_is_stable() {
            // previous = 203 - 100 = 103, change ≈ -2.9%
            assert_eq!(trend(203, 100), Trend::Stable);
            // previous = 195 - 100 = 95, change ≈ +5.3%
            assert_eq!(trend(195, 100), Trend::Down);
        }

        #[test]
        fn implied_previous_average_can_mislead() {
            // Real data: the prior three months averaged 60 minutes over 10
            // responses and the last three months averaged 30 over 2 responses,
            // so the six-month average is (600 + 60) / 12 = 55. Responses got
            // faster, yet the implied previous average is 55 - 30 = 25, the
            // change is +20% and the trend reads as declining.
            assert_eq!(implied_previous_average(55, 30), 25);
            assert_eq!(trend(55, 30), Trend::Down);
        }

        #[test]
        fn implied_previous_average_can_be_negative() {
            // six-month mean below the three-month mean gives a negative
            // "previous" value; change = (50 - -10) / -10 = -600%
            assert_eq!(implied_previous_average(40, 50), -10);
            assert_eq!(trend(40, 50), Trend::Up);
        }

        #[test]
        fn custom_stability_threshold() {
            let loose = ComparisonThresholds {
                trend_stable_pct: 60.0,
                ..ComparisonThresholds::default()
            };
            assert_eq!(trend_with(150, 50, &loose), Trend::Stable);
        }
    }
}
