//! # Route Value Object
//!
//! A single origin → destination leg of a charter request.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One flight leg.
///
/// Airports are kept as the codes the requester entered (usually ICAO or
/// IATA); no validation is applied.
///
/// # Examples
///
/// ```
/// use charter_analytics::domain::value_objects::Routing;
///
/// let leg = Routing::new("EGLF", "LFMN");
/// assert_eq!(leg.to_string(), "EGLF → LFMN");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Routing {
    /// Departure airport code.
    #[serde(default, deserialize_with = "super::lenient::or_default")]
    departure_airport: String,
    /// Arrival airport code.
    #[serde(default, deserialize_with = "super::lenient::or_default")]
    arrival_airport: String,
}

impl Routing {
    /// Creates a leg.
    #[must_use]
    pub fn new(departure_airport: impl Into<String>, arrival_airport: impl Into<String>) -> Self {
        Self {
            departure_airport: departure_airport.into(),
            arrival_airport: arrival_airport.into(),
        }
    }

    /// Returns the departure airport code.
    #[inline]
    #[must_use]
    pub fn departure_airport(&self) -> &str {
        &self.departure_airport
    }

    /// Returns the arrival airport code.
    #[inline]
    #[must_use]
    pub fn arrival_airport(&self) -> &str {
        &self.arrival_airport
    }
}

impl fmt::Display for Routing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.departure_airport, self.arrival_airport)
    }
}
