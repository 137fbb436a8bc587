//! Serde helpers for fields whose shape the export does not guarantee.
//!
//! A field holding `null` or a value of the wrong type decodes to its
//! default instead of failing the whole record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decodes `T`, falling back to `T::default()` on null or a mismatched shape.
///
/// Use with `#[serde(default, deserialize_with = "...")]`.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Decodes an array, dropping the elements that do not decode as `T`.
///
/// Anything other than an array yields an empty list.
pub(crate) fn skip_invalid<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| T::deserialize(item).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}
