//! # Timestamp Value Object
//!
//! DateTime wrapper with domain-specific methods, plus normalization of the
//! loosely-typed timestamp shapes found in document-database exports.
//!
//! Every timestamp entering the crate passes through [`RawTimestamp`] and is
//! normalized to a [`Timestamp`] before any aggregation runs. Shapes that
//! cannot be understood normalize to `None` rather than failing.
//!
//! # Examples
//!
//! ```
//! use charter_analytics::domain::value_objects::timestamp::{RawTimestamp, Timestamp};
//!
//! let now = Timestamp::now();
//! let later = now.add_secs(60);
//! assert!(later > now);
//!
//! let raw = RawTimestamp::Seconds { seconds: 1_704_067_200, nanoseconds: 0 };
//! assert_eq!(raw.to_instant().unwrap().timestamp_secs(), 1_704_067_200);
//! ```

use chrono::{DateTime, Duration, Months, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Milliseconds in one minute.
const MILLIS_PER_MINUTE: f64 = 60_000.0;

/// A UTC timestamp with nanosecond precision.
///
/// Wraps `chrono::DateTime<Utc>`. Serializes as an RFC 3339 string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from Unix milliseconds.
    ///
    /// # Examples
    ///
    /// ```
    /// use charter_analytics::domain::value_objects::timestamp::Timestamp;
    ///
    /// let ts = Timestamp::from_millis(1704067200000).unwrap();
    /// assert_eq!(ts.timestamp_millis(), 1704067200000);
    /// ```
    #[must_use]
    pub fn from_millis(millis: i64) -> Option<Self> {
        Utc.timestamp_millis_opt(millis).single().map(Self)
    }

    /// Creates a timestamp from Unix seconds and a nanosecond remainder.
    #[must_use]
    pub fn from_secs_nanos(secs: i64, nanos: u32) -> Option<Self> {
        Utc.timestamp_opt(secs, nanos).single().map(Self)
    }

    /// Creates a timestamp from Unix seconds.
    #[must_use]
    pub fn from_secs(secs: i64) -> Option<Self> {
        Self::from_secs_nanos(secs, 0)
    }

    /// Returns the Unix timestamp in milliseconds.
    #[inline]
    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Returns the Unix timestamp in seconds.
    #[inline]
    #[must_use]
    pub fn timestamp_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Adds seconds to the timestamp (negative values go back in time).
    #[must_use]
    pub fn add_secs(&self, secs: i64) -> Self {
        Self(self.0 + Duration::seconds(secs))
    }

    /// Subtracts seconds from the timestamp.
    #[must_use]
    pub fn sub_secs(&self, secs: i64) -> Self {
        Self(self.0 - Duration::seconds(secs))
    }

    /// Subtracts whole calendar months.
    ///
    /// Days that do not exist in the target month clamp to its last day
    /// (31 March minus one month is 29 or 28 February). Returns `None` only
    /// when the result would fall outside the representable range.
    ///
    /// # Examples
    ///
    /// ```
    /// use charter_analytics::domain::value_objects::timestamp::Timestamp;
    ///
    /// let ts = Timestamp::parse("2024-07-15T00:00:00Z").unwrap();
    /// assert_eq!(ts.sub_months(6).unwrap().to_iso8601(), "2024-01-15T00:00:00+00:00");
    /// ```
    #[must_use]
    pub fn sub_months(&self, months: u32) -> Option<Self> {
        self.0.checked_sub_months(Months::new(months)).map(Self)
    }

    /// Returns the signed number of whole minutes from `self` to `later`,
    /// rounded to the nearest minute.
    ///
    /// Negative when `later` precedes `self`.
    #[must_use]
    pub fn minutes_until(&self, later: &Self) -> i64 {
        let diff_ms = later.timestamp_millis().saturating_sub(self.timestamp_millis());
        (diff_ms as f64 / MILLIS_PER_MINUTE).round() as i64
    }

    /// Parses an RFC 3339 string, a naive `YYYY-MM-DDTHH:MM:SS` (taken as UTC)
    /// or a bare `YYYY-MM-DD` date (midnight UTC).
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some(Self(dt.with_timezone(&Utc)));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(Self(naive.and_utc()));
        }
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Self(naive.and_utc()))
    }

    /// Formats the timestamp as ISO 8601.
    #[must_use]
    pub fn to_iso8601(&self) -> String {
        self.0.to_rfc3339()
    }

    /// Formats the calendar date as `YYYY-MM-DD`.
    #[must_use]
    pub fn to_date_string(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    /// Drops seconds and sub-second precision.
    ///
    /// # Examples
    ///
    /// ```
    /// use charter_analytics::domain::value_objects::timestamp::Timestamp;
    ///
    /// let ts = Timestamp::parse("2024-07-15T10:42:37.125Z").unwrap();
    /// assert_eq!(ts.truncate_to_minute().to_iso8601(), "2024-07-15T10:42:00+00:00");
    /// ```
    #[must_use]
    pub fn truncate_to_minute(&self) -> Self {
        let secs = self.timestamp_secs();
        Self::from_secs(secs - secs.rem_euclid(60)).unwrap_or(*self)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

/// A timestamp as it arrives from the data-access layer.
///
/// Document-database exports carry timestamps in several shapes: native
/// timestamp objects serialized as `{seconds, nanoseconds}` (or the admin
/// SDK's `{_seconds, _nanoseconds}`), epoch milliseconds, or ISO strings.
/// Anything else lands in [`RawTimestamp::Unrecognized`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    /// Seconds plus nanoseconds since the Unix epoch.
    Seconds {
        /// Whole seconds.
        #[serde(alias = "_seconds")]
        seconds: i64,
        /// Nanosecond remainder.
        #[serde(alias = "_nanoseconds", default)]
        nanoseconds: u32,
    },
    /// Milliseconds since the Unix epoch.
    Millis(i64),
    /// Milliseconds since the Unix epoch with a fractional part.
    FractionalMillis(f64),
    /// Date/time text.
    Text(String),
    /// Any other shape.
    Unrecognized(serde_json::Value),
}

impl RawTimestamp {
    /// Normalizes to a [`Timestamp`], or `None` if the value is malformed
    /// or out of range.
    #[must_use]
    pub fn to_instant(&self) -> Option<Timestamp> {
        match self {
            Self::Seconds {
                seconds,
                nanoseconds,
            } => Timestamp::from_secs_nanos(*seconds, *nanoseconds),
            Self::Millis(millis) => Timestamp::from_millis(*millis),
            Self::FractionalMillis(millis) if millis.is_finite() => {
                Timestamp::from_millis(millis.round() as i64)
            }
            Self::FractionalMillis(_) => None,
            Self::Text(text) => Timestamp::parse(text),
            Self::Unrecognized(_) => None,
        }
    }
}

/// Serde helper: deserializes any [`RawTimestamp`] shape into
/// `Option<Timestamp>`, mapping null, missing and malformed values to `None`.
///
/// Use with `#[serde(default, deserialize_with = "...")]`.
///
/// # Errors
///
/// Only fails if the underlying deserializer itself fails; unrecognized
/// timestamp shapes are not errors.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawTimestamp>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(RawTimestamp::to_instant))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod construction {
        use super::*;

        #[test]
        fn from_millis_works() {
            let ts = Timestamp::from_millis(1704067200000).unwrap();
            assert_eq!(ts.timestamp_millis(), 1704067200000);
        }

        #[test]
        fn from_secs_nanos_keeps_subsecond_part() {
            let ts = Timestamp::from_secs_nanos(1704067200, 500_000_000).unwrap();
            assert_eq!(ts.timestamp_millis(), 1704067200500);
        }

        #[test]
        fn parse_accepts_rfc3339_with_offset() {
            let ts = Timestamp::parse("2024-01-01T02:00:00+02:00").unwrap();
            assert_eq!(ts.timestamp_secs(), 1704067200);
        }

        #[test]
        fn parse_accepts_naive_and_date_only() {
            let naive = Timestamp::parse("2024-01-01T00:00:00").unwrap();
            let date = Timestamp::parse("2024-01-01").unwrap();
            assert_eq!(naive, date);
            assert_eq!(date.timestamp_secs(), 1704067200);
        }

        #[test]
        fn parse_rejects_garbage() {
            assert!(Timestamp::parse("next tuesday").is_none());
            assert!(Timestamp::parse("").is_none());
        }
    }

    mod arithmetic {
        use super::*;

        #[test]
        fn sub_months_clamps_to_month_end() {
            let ts = Timestamp::parse("2024-03-31T12:00:00Z").unwrap();
            let earlier = ts.sub_months(1).unwrap();
            assert_eq!(earlier.to_date_string(), "2024-02-29");
        }

        #[test]
        fn sub_months_crosses_year() {
            let ts = Timestamp::parse("2024-02-10T00:00:00Z").unwrap();
            assert_eq!(ts.sub_months(12).unwrap().to_date_string(), "2023-02-10");
            assert_eq!(ts.sub_months(3).unwrap().to_date_string(), "2023-11-10");
        }

        #[test]
        fn minutes_until_rounds_to_nearest() {
            let start = Timestamp::from_secs(0).unwrap();
            assert_eq!(start.minutes_until(&start.add_secs(89)), 1);
            assert_eq!(start.minutes_until(&start.add_secs(90)), 2);
            assert_eq!(start.minutes_until(&start.add_secs(3600)), 60);
        }

        #[test]
        fn minutes_until_is_negative_backwards() {
            let start = Timestamp::from_secs(3600).unwrap();
            assert_eq!(start.minutes_until(&start.sub_secs(600)), -10);
        }

        #[test]
        fn truncate_to_minute_is_idempotent() {
            let ts = Timestamp::from_secs_nanos(1_000_059, 999_000_000).unwrap();
            let truncated = ts.truncate_to_minute();
            assert_eq!(truncated.timestamp_millis(), 1_000_020_000);
            assert_eq!(truncated.truncate_to_minute(), truncated);
        }

        #[test]
        fn truncate_before_epoch_rounds_down() {
            let ts = Timestamp::from_secs(-30).unwrap();
            assert_eq!(ts.truncate_to_minute().timestamp_secs(), -60);
        }
    }

    mod normalization {
        use super::*;

        fn raw(json: &str) -> RawTimestamp {
            serde_json::from_str(json).unwrap()
        }

        #[test]
        fn seconds_object() {
            let ts = raw(r#"{"seconds": 1704067200, "nanoseconds": 0}"#).to_instant();
            assert_eq!(ts.unwrap().timestamp_secs(), 1704067200);
        }

        #[test]
        fn underscored_seconds_object() {
            let ts = raw(r#"{"_seconds": 1704067200, "_nanoseconds": 250000000}"#).to_instant();
            assert_eq!(ts.unwrap().timestamp_millis(), 1704067200250);
        }

        #[test]
        fn seconds_without_nanoseconds() {
            let ts = raw(r#"{"seconds": 1704067200}"#).to_instant();
            assert_eq!(ts.unwrap().timestamp_secs(), 1704067200);
        }

        #[test]
        fn epoch_millis_number() {
            let ts = raw("1704067200000").to_instant();
            assert_eq!(ts.unwrap().timestamp_millis(), 1704067200000);
        }

        #[test]
        fn fractional_millis_number() {
            let ts = raw("1704067200000.4").to_instant();
            assert_eq!(ts.unwrap().timestamp_millis(), 1704067200000);
        }

        #[test]
        fn iso_string() {
            let ts = raw(r#""2024-01-01T00:00:00.000Z""#).to_instant();
            assert_eq!(ts.unwrap().timestamp_secs(), 1704067200);
        }

        #[test]
        fn malformed_shapes_normalize_to_none() {
            assert!(raw(r#""not a date""#).to_instant().is_none());
            assert!(raw(r#"{"toDate": true}"#).to_instant().is_none());
            assert!(raw("[1, 2]").to_instant().is_none());
            assert!(raw("true").to_instant().is_none());
        }
    }

    mod lenient_deserialize {
        use super::*;

        #[derive(Debug, Deserialize)]
        struct Holder {
            #[serde(default, deserialize_with = "deserialize_lenient")]
            at: Option<Timestamp>,
        }

        #[test]
        fn missing_field_is_none() {
            let holder: Holder = serde_json::from_str("{}").unwrap();
            assert!(holder.at.is_none());
        }

        #[test]
        fn null_is_none() {
            let holder: Holder = serde_json::from_str(r#"{"at": null}"#).unwrap();
            assert!(holder.at.is_none());
        }

        #[test]
        fn malformed_is_none_not_error() {
            let holder: Holder = serde_json::from_str(r#"{"at": {"foo": "bar"}}"#).unwrap();
            assert!(holder.at.is_none());
        }

        #[test]
        fn serialized_timestamp_round_trips() {
            let ts = Timestamp::from_millis(1704067200123).unwrap();
            let json = format!(r#"{{"at": {}}}"#, serde_json::to_string(&ts).unwrap());
            let holder: Holder = serde_json::from_str(&json).unwrap();
            assert_eq!(holder.at, Some(ts));
        }
    }
}
