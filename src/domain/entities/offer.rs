//! # Offer Entity
//!
//! One operator's response to a quote request.
//!
//! # Examples
//!
//! ```
//! use charter_analytics::domain::entities::offer::OfferBuilder;
//! use charter_analytics::domain::value_objects::{OperatorCode, Timestamp};
//!
//! let created = Timestamp::from_secs(1_700_000_000).unwrap();
//! let offer = OfferBuilder::new(OperatorCode::new("OP1"))
//!     .created_at(created)
//!     .updated_at(created.add_secs(45 * 60))
//!     .build();
//!
//! assert_eq!(offer.market_response_minutes(), Some(45));
//! assert_eq!(offer.status(), "submitted");
//! ```

use crate::domain::value_objects::timestamp::{Timestamp, deserialize_lenient};
use crate::domain::value_objects::OperatorCode;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Status shown for an offer that never had one recorded.
pub const DEFAULT_OFFER_STATUS: &str = "submitted";

/// An operator's offer on a quote request.
///
/// # Invariants
///
/// - Belongs to exactly one quote request (the one holding it).
/// - A response time is only meaningful when strictly positive; zero and
///   negative values are treated as absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    /// Responding operator.
    #[serde(default, deserialize_with = "crate::domain::value_objects::lenient::or_default")]
    operator_user_code: OperatorCode,
    /// When the offer was first written.
    #[serde(default, deserialize_with = "deserialize_lenient")]
    created_at: Option<Timestamp>,
    /// When the offer was last updated.
    #[serde(default, deserialize_with = "deserialize_lenient")]
    updated_at: Option<Timestamp>,
    /// Response latency recorded by the platform, in minutes.
    #[serde(default, deserialize_with = "deserialize_minutes")]
    response_time_minutes: Option<i64>,
    /// Lifecycle tag of the offer.
    #[serde(default, deserialize_with = "crate::domain::value_objects::lenient::or_default")]
    offer_status: Option<String>,
}

impl Offer {
    /// Returns the responding operator.
    #[inline]
    #[must_use]
    pub fn operator_user_code(&self) -> &OperatorCode {
        &self.operator_user_code
    }

    /// Returns true if this offer was made by `operator`.
    #[inline]
    #[must_use]
    pub fn is_from(&self, operator: &OperatorCode) -> bool {
        &self.operator_user_code == operator
    }

    /// Returns when the offer was created, if known.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Option<Timestamp> {
        self.created_at
    }

    /// Returns when the offer was last updated, if known.
    #[inline]
    #[must_use]
    pub fn updated_at(&self) -> Option<Timestamp> {
        self.updated_at
    }

    /// Returns the raw recorded response time, which may be non-positive.
    #[inline]
    #[must_use]
    pub fn raw_response_time_minutes(&self) -> Option<i64> {
        self.response_time_minutes
    }

    /// Returns the recorded response time if it is strictly positive.
    #[must_use]
    pub fn recorded_response_minutes(&self) -> Option<u64> {
        positive_minutes(self.response_time_minutes)
    }

    /// Returns the response time used for market-wide statistics.
    ///
    /// Prefers the recorded value; otherwise derives `updated_at − created_at`
    /// rounded to the nearest minute. `None` unless the result is positive.
    #[must_use]
    pub fn market_response_minutes(&self) -> Option<u64> {
        self.recorded_response_minutes().or_else(|| {
            let (created, updated) = (self.created_at?, self.updated_at?);
            positive_minutes(Some(created.minutes_until(&updated)))
        })
    }

    /// Returns the offer status, defaulting to `"submitted"`.
    #[must_use]
    pub fn status(&self) -> &str {
        match self.offer_status.as_deref() {
            Some(status) if !status.trim().is_empty() => status,
            _ => DEFAULT_OFFER_STATUS,
        }
    }
}

impl fmt::Display for Offer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.recorded_response_minutes() {
            Some(minutes) => write!(
                f,
                "Offer({} {} {}m)",
                self.operator_user_code,
                self.status(),
                minutes
            ),
            None => write!(f, "Offer({} {})", self.operator_user_code, self.status()),
        }
    }
}

fn positive_minutes(minutes: Option<i64>) -> Option<u64> {
    minutes.and_then(|m| u64::try_from(m).ok()).filter(|m| *m > 0)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMinutes {
    Whole(i64),
    Fractional(f64),
    Text(String),
    Other(serde_json::Value),
}

/// Accepts whole or fractional numbers and numeric strings; anything else
/// becomes `None`.
fn deserialize_minutes<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawMinutes>::deserialize(deserializer)?;
    Ok(raw.and_then(|raw| match raw {
        RawMinutes::Whole(m) => Some(m),
        RawMinutes::Fractional(m) if m.is_finite() => Some(m.round() as i64),
        RawMinutes::Fractional(_) | RawMinutes::Other(_) => None,
        RawMinutes::Text(text) => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|m| m.is_finite())
            .map(|m| m.round() as i64),
    }))
}

/// Builder for [`Offer`].
#[derive(Debug, Clone)]
pub struct OfferBuilder {
    operator_user_code: OperatorCode,
    created_at: Option<Timestamp>,
    updated_at: Option<Timestamp>,
    response_time_minutes: Option<i64>,
    offer_status: Option<String>,
}

impl OfferBuilder {
    /// Creates a builder for an offer by `operator`.
    #[must_use]
    pub fn new(operator: OperatorCode) -> Self {
        Self {
            operator_user_code: operator,
            created_at: None,
            updated_at: None,
            response_time_minutes: None,
            offer_status: None,
        }
    }

    /// Sets the creation time.
    #[must_use]
    pub fn created_at(mut self, at: Timestamp) -> Self {
        self.created_at = Some(at);
        self
    }

    /// Sets the last update time.
    #[must_use]
    pub fn updated_at(mut self, at: Timestamp) -> Self {
        self.updated_at = Some(at);
        self
    }

    /// Sets the recorded response time. Non-positive values are stored but
    /// never counted.
    #[must_use]
    pub fn response_time_minutes(mut self, minutes: i64) -> Self {
        self.response_time_minutes = Some(minutes);
        self
    }

    /// Sets the offer status.
    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.offer_status = Some(status.into());
        self
    }

    /// Builds the offer.
    #[must_use]
    pub fn build(self) -> Offer {
        Offer {
            operator_user_code: self.operator_user_code,
            created_at: self.created_at,
            updated_at: self.updated_at,
            response_time_minutes: self.response_time_minutes,
            offer_status: self.offer_status,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn op() -> OperatorCode {
        OperatorCode::new("OP1")
    }

    fn base() -> Timestamp {
        Timestamp::from_secs(1_700_000_000).unwrap()
    }

    mod response_time {
        use super::*;

        #[test]
        fn recorded_value_is_preferred() {
            let offer = OfferBuilder::new(op())
                .created_at(base())
                .updated_at(base().add_secs(600))
                .response_time_minutes(25)
                .build();

            assert_eq!(offer.recorded_response_minutes(), Some(25));
            assert_eq!(offer.market_response_minutes(), Some(25));
        }

        #[test]
        fn non_positive_recorded_value_is_absent() {
            let zero = OfferBuilder::new(op()).response_time_minutes(0).build();
            let negative = OfferBuilder::new(op()).response_time_minutes(-5).build();

            assert_eq!(zero.recorded_response_minutes(), None);
            assert_eq!(negative.recorded_response_minutes(), None);
            assert_eq!(zero.raw_response_time_minutes(), Some(0));
        }

        #[test]
        fn market_falls_back_to_timestamps() {
            let offer = OfferBuilder::new(op())
                .created_at(base())
                .updated_at(base().add_secs(90 * 60))
                .response_time_minutes(0)
                .build();

            assert_eq!(offer.recorded_response_minutes(), None);
            assert_eq!(offer.market_response_minutes(), Some(90));
        }

        #[test]
        fn fallback_requires_positive_difference() {
            let same = OfferBuilder::new(op())
                .created_at(base())
                .updated_at(base())
                .build();
            let backwards = OfferBuilder::new(op())
                .created_at(base())
                .updated_at(base().sub_secs(600))
                .build();

            assert_eq!(same.market_response_minutes(), None);
            assert_eq!(backwards.market_response_minutes(), None);
        }

        #[test]
        fn fallback_requires_both_timestamps() {
            let offer = OfferBuilder::new(op()).created_at(base()).build();
            assert_eq!(offer.market_response_minutes(), None);
        }
    }

    mod status {
        use super::*;

        #[test]
        fn defaults_to_submitted() {
            assert_eq!(OfferBuilder::new(op()).build().status(), "submitted");
            assert_eq!(OfferBuilder::new(op()).status("  ").build().status(), "submitted");
        }

        #[test]
        fn explicit_status_is_kept() {
            let offer = OfferBuilder::new(op()).status("accepted").build();
            assert_eq!(offer.status(), "accepted");
        }
    }

    mod deserialization {
        use super::*;

        #[test]
        fn document_shape() {
            let json = r#"{
                "operatorUserCode": "OP1",
                "createdAt": {"seconds": 1700000000, "nanoseconds": 0},
                "updatedAt": "2023-11-14T22:13:20Z",
                "responseTimeMinutes": 42,
                "offerStatus": "pending",
                "price": 18500
            }"#;
            let offer: Offer = serde_json::from_str(json).unwrap();

            assert!(offer.is_from(&op()));
            assert_eq!(offer.created_at(), Some(base()));
            assert_eq!(offer.updated_at(), Some(base()));
            assert_eq!(offer.recorded_response_minutes(), Some(42));
            assert_eq!(offer.status(), "pending");
        }

        #[test]
        fn lenient_response_minutes() {
            let fractional: Offer =
                serde_json::from_str(r#"{"responseTimeMinutes": 12.6}"#).unwrap();
            let text: Offer = serde_json::from_str(r#"{"responseTimeMinutes": "30"}"#).unwrap();
            let junk: Offer = serde_json::from_str(r#"{"responseTimeMinutes": "soon"}"#).unwrap();
            let object: Offer = serde_json::from_str(r#"{"responseTimeMinutes": {}}"#).unwrap();

            assert_eq!(fractional.recorded_response_minutes(), Some(13));
            assert_eq!(text.recorded_response_minutes(), Some(30));
            assert_eq!(junk.raw_response_time_minutes(), None);
            assert_eq!(object.raw_response_time_minutes(), None);
        }

        #[test]
        fn null_or_mistyped_text_fields_default() {
            let offer: Offer = serde_json::from_str(
                r#"{"operatorUserCode": null, "offerStatus": 2, "responseTimeMinutes": 9}"#,
            )
            .unwrap();

            assert!(offer.operator_user_code().is_empty());
            assert_eq!(offer.status(), DEFAULT_OFFER_STATUS);
            assert_eq!(offer.recorded_response_minutes(), Some(9));
        }

        #[test]
        fn malformed_timestamps_are_dropped() {
            let offer: Offer =
                serde_json::from_str(r#"{"operatorUserCode": "OP1", "createdAt": "yesterday"}"#)
                    .unwrap();
            assert_eq!(offer.created_at(), None);
        }
    }

    #[test]
    fn display_format() {
        let offer = OfferBuilder::new(op()).response_time_minutes(15).build();
        assert_eq!(offer.to_string(), "Offer(OP1 submitted 15m)");
    }
}
