//! # Identifier Types
//!
//! String-backed identifiers for quote requests and operators.
//!
//! Identifiers originate in the document database, so they are opaque
//! strings rather than UUIDs; [`QuoteRequestId::generate`] mints a UUID v4
//! string when a request is built in-process.
//!
//! # Examples
//!
//! ```
//! use charter_analytics::domain::value_objects::{OperatorCode, RequestCode};
//!
//! let op = OperatorCode::new("OP1");
//! assert_eq!(op.as_str(), "OP1");
//! assert_eq!(RequestCode::new("QR-1001").to_string(), "QR-1001");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from any string-like value.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as a string slice.
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true if the identifier is empty.
            #[inline]
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Document identifier of a quote request.
    QuoteRequestId
);

string_id!(
    /// Human-readable quote request reference shown to users (e.g. `QR-1001`).
    RequestCode
);

string_id!(
    /// User code identifying an aircraft operator.
    OperatorCode
);

impl QuoteRequestId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}
