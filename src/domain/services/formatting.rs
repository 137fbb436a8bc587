//! # Response-Time Formatting
//!
//! Human-readable durations and the five response-time bands shared by the
//! numeric label and the colour encoding used in gauges and tables.
//!
//! | Upper bound (min) | Band               | Colour      |
//! |-------------------|--------------------|-------------|
//! | 60                | Excellent          | green       |
//! | 240               | Good               | light green |
//! | 1440              | Fair               | yellow      |
//! | 4320              | Slow               | orange      |
//! | (none)            | Needs Improvement  | red         |

use serde::{Deserialize, Serialize};
use std::fmt;

const MINUTES_PER_HOUR: u64 = 60;
const MINUTES_PER_DAY: u64 = 24 * MINUTES_PER_HOUR;

/// Formats minutes using the largest applicable unit.
///
/// # Examples
///
/// ```
/// use charter_analytics::domain::services::formatting::format_response_time;
///
/// assert_eq!(format_response_time(0), "0m");
/// assert_eq!(format_response_time(45), "45m");
/// assert_eq!(format_response_time(90), "1h 30m");
/// assert_eq!(format_response_time(1500), "1d 1h");
/// assert_eq!(format_response_time(4320), "3d");
/// ```
#[must_use]
pub fn format_response_time(minutes: u64) -> String {
    let days = minutes / MINUTES_PER_DAY;
    let hours = (minutes % MINUTES_PER_DAY) / MINUTES_PER_HOUR;
    let mins = minutes % MINUTES_PER_HOUR;

    if days > 0 {
        if hours > 0 {
            format!("{days}d {hours}h")
        } else {
            format!("{days}d")
        }
    } else if hours > 0 {
        if mins > 0 {
            format!("{hours}h {mins}m")
        } else {
            format!("{hours}h")
        }
    } else {
        format!("{mins}m")
    }
}

/// Formats an average, rendering zero as `"N/A"`.
#[must_use]
pub fn format_average(minutes: u64) -> String {
    if minutes == 0 {
        "N/A".to_string()
    } else {
        format_response_time(minutes)
    }
}

/// Returns the hex colour for a response time.
#[must_use]
pub fn response_time_color(minutes: u64) -> &'static str {
    ResponseTimeBand::from_minutes(minutes).color_hex()
}

/// Qualitative response-time band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseTimeBand {
    /// Up to one hour.
    Excellent,
    /// Up to four hours.
    Good,
    /// Up to one day.
    Fair,
    /// Up to three days.
    Slow,
    /// Longer than three days.
    NeedsImprovement,
}

impl ResponseTimeBand {
    /// All bands, fastest first.
    pub const ALL: [ResponseTimeBand; 5] = [
        Self::Excellent,
        Self::Good,
        Self::Fair,
        Self::Slow,
        Self::NeedsImprovement,
    ];

    /// Classifies a response time.
    #[must_use]
    pub const fn from_minutes(minutes: u64) -> Self {
        match minutes {
            0..=60 => Self::Excellent,
            61..=240 => Self::Good,
            241..=1440 => Self::Fair,
            1441..=4320 => Self::Slow,
            _ => Self::NeedsImprovement,
        }
    }

    /// Returns the inclusive upper bound in minutes, `None` for the last band.
    #[must_use]
    pub const fn upper_bound_minutes(self) -> Option<u64> {
        match self {
            Self::Excellent => Some(60),
            Self::Good => Some(240),
            Self::Fair => Some(1440),
            Self::Slow => Some(4320),
            Self::NeedsImprovement => None,
        }
    }

    /// Returns the display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Slow => "Slow",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }

    /// Returns the colour name.
    #[must_use]
    pub const fn color_name(self) -> &'static str {
        match self {
            Self::Excellent => "green",
            Self::Good => "light-green",
            Self::Fair => "yellow",
            Self::Slow => "orange",
            Self::NeedsImprovement => "red",
        }
    }

    /// Returns the colour as a hex code.
    #[must_use]
    pub const fn color_hex(self) -> &'static str {
        match self {
            Self::Excellent => "#4caf50",
            Self::Good => "#8bc34a",
            Self::Fair => "#ffeb3b",
            Self::Slow => "#ff9800",
            Self::NeedsImprovement => "#f44336",
        }
    }
}

impl fmt::Display for ResponseTimeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
