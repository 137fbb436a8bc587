//! # Domain Enums
//!
//! Enumeration types for the analytics domain:
//!
//! - [`Period`] - Look-back window used to bucket quote requests
//! - [`PerformanceStatus`] - Operator response speed relative to the market
//! - [`Trend`] - Direction of recent response-time change
//! - [`QuoteRequestStatus`] - Lifecycle tag of a quote request
//!
//! All enums implement `Display`, `FromStr` and Serde traits.

use super::timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when parsing an enum from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseEnumError {
    /// The string does not name any variant.
    #[error("invalid {0} value: '{1}'")]
    InvalidValue(&'static str, String),
}

/// Fixed historical look-back window.
///
/// Bounded windows are computed independently from the evaluation instant,
/// so they nest: every request in `ThreeMonths` is also in `SixMonths`,
/// `TwelveMonths` and `All`.
///
/// # Examples
///
/// ```
/// use charter_analytics::domain::value_objects::enums::Period;
///
/// let period: Period = "6m".parse().unwrap();
/// assert_eq!(period, Period::SixMonths);
/// assert_eq!(period.months(), Some(6));
/// assert_eq!(Period::All.months(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Period {
    /// Every request regardless of age.
    #[default]
    #[serde(rename = "all")]
    All,
    /// The last 12 months.
    #[serde(rename = "12m")]
    TwelveMonths,
    /// The last 6 months.
    #[serde(rename = "6m")]
    SixMonths,
    /// The last 3 months.
    #[serde(rename = "3m")]
    ThreeMonths,
}

impl Period {
    /// All periods, widest first.
    pub const ALL: [Period; 4] = [
        Period::All,
        Period::TwelveMonths,
        Period::SixMonths,
        Period::ThreeMonths,
    ];

    /// Returns the window length in months, or `None` for [`Period::All`].
    #[inline]
    #[must_use]
    pub const fn months(self) -> Option<u32> {
        match self {
            Self::All => None,
            Self::TwelveMonths => Some(12),
            Self::SixMonths => Some(6),
            Self::ThreeMonths => Some(3),
        }
    }

    /// Returns the earliest qualifying submission instant as of `now`, or
    /// `None` for [`Period::All`].
    #[must_use]
    pub fn cutoff(self, now: Timestamp) -> Option<Timestamp> {
        self.months().and_then(|months| now.sub_months(months))
    }

    /// Returns the short code used in URLs and JSON (`all`, `12m`, `6m`, `3m`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::TwelveMonths => "12m",
            Self::SixMonths => "6m",
            Self::ThreeMonths => "3m",
        }
    }

    /// Returns a human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All time",
            Self::TwelveMonths => "Last 12 months",
            Self::SixMonths => "Last 6 months",
            Self::ThreeMonths => "Last 3 months",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "12m" => Ok(Self::TwelveMonths),
            "6m" => Ok(Self::SixMonths),
            "3m" => Ok(Self::ThreeMonths),
            _ => Err(ParseEnumError::InvalidValue("Period", s.to_string())),
        }
    }
}

/// Operator response speed relative to the market average.
///
/// Lower response times are better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PerformanceStatus {
    /// Either the operator or the market has no data for the period.
    NoData,
    /// At least 30% faster than the market.
    MuchBetter,
    /// More than 10% but less than 30% faster.
    Better,
    /// Within 10% of the market.
    Similar,
    /// More than 10% but less than 30% slower.
    Worse,
    /// At least 30% slower than the market.
    MuchWorse,
}

impl PerformanceStatus {
    /// Returns the kebab-case code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoData => "no-data",
            Self::MuchBetter => "much-better",
            Self::Better => "better",
            Self::Similar => "similar",
            Self::Worse => "worse",
            Self::MuchWorse => "much-worse",
        }
    }
}

impl fmt::Display for PerformanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PerformanceStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "no-data" => Ok(Self::NoData),
            "much-better" => Ok(Self::MuchBetter),
            "better" => Ok(Self::Better),
            "similar" => Ok(Self::Similar),
            "worse" => Ok(Self::Worse),
            "much-worse" => Ok(Self::MuchWorse),
            _ => Err(ParseEnumError::InvalidValue(
                "PerformanceStatus",
                s.to_string(),
            )),
        }
    }
}

/// Direction of the response-time trend.
///
/// `Up` means improving: recent responses are faster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Response times are falling.
    Up,
    /// Response times are rising.
    Down,
    /// Change is below the stability threshold, or there is not enough data.
    #[default]
    Stable,
}

impl Trend {
    /// Returns the lowercase code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Stable => "stable",
        }
    }

    /// Returns narrative text for dashboards.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Up => "improving",
            Self::Down => "declining",
            Self::Stable => "stable",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Trend {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" | "improving" => Ok(Self::Up),
            "down" | "declining" => Ok(Self::Down),
            "stable" => Ok(Self::Stable),
            _ => Err(ParseEnumError::InvalidValue("Trend", s.to_string())),
        }
    }
}

/// Lifecycle tag of a quote request.
///
/// Informational only for analytics. Tags outside the known vocabulary are
/// kept verbatim in [`QuoteRequestStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuoteRequestStatus {
    /// Submitted, no offers yet.
    #[default]
    Pending,
    /// At least one operator offer has arrived.
    QuoteReceived,
    /// The requester accepted an offer.
    Accepted,
    /// The accepted offer became a booking.
    Booked,
    /// Withdrawn by the requester.
    Cancelled,
    /// The request lapsed without acceptance.
    Expired,
    /// Unknown tag.
    Other(String),
}

impl QuoteRequestStatus {
    /// Returns the canonical kebab-case code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::QuoteReceived => "quote-received",
            Self::Accepted => "accepted",
            Self::Booked => "booked",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
            Self::Other(tag) => tag,
        }
    }
}

impl fmt::Display for QuoteRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for QuoteRequestStatus {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "pending" => Self::Pending,
            "quote-received" | "quoted" => Self::QuoteReceived,
            "accepted" => Self::Accepted,
            "booked" | "confirmed" => Self::Booked,
            "cancelled" | "canceled" => Self::Cancelled,
            "expired" => Self::Expired,
            _ => Self::Other(value),
        }
    }
}

impl From<QuoteRequestStatus> for String {
    fn from(value: QuoteRequestStatus) -> Self {
        value.as_str().to_string()
    }
}
