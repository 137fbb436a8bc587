//! # JSON File Source
//!
//! Reads quote requests from a document-database JSON export.
//!
//! Two layouts are accepted: a bare array of quote request documents, or
//! an object with the array under `quoteRequests`. Timestamps inside the
//! documents may use any of the shapes [`RawTimestamp`] understands.
//!
//! Records are decoded one at a time. A record that is not an object is
//! skipped with a warning and the rest of the export still loads.
//!
//! The file is re-read on every call, so edits show up without a restart.
//!
//! [`RawTimestamp`]: crate::domain::value_objects::RawTimestamp

use crate::domain::entities::quote_request::QuoteRequest;
use crate::domain::value_objects::QuoteRequestId;
use crate::infrastructure::persistence::traits::{
    QuoteRequestSource, RepositoryError, RepositoryResult, sort_for_source,
};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Key holding the records in the wrapped layout.
const WRAPPED_KEY: &str = "quoteRequests";

/// Parses an export held in memory.
///
/// # Errors
///
/// Returns [`RepositoryError::Serialization`] if the text is not JSON or
/// is neither an array nor an object with a `quoteRequests` array.
pub fn parse_export(json: &str) -> RepositoryResult<Vec<QuoteRequest>> {
    let root: Value =
        serde_json::from_str(json).map_err(|e| RepositoryError::serialization(e.to_string()))?;
    let records = match root {
        Value::Array(records) => records,
        Value::Object(mut object) => match object.remove(WRAPPED_KEY) {
            Some(Value::Array(records)) => records,
            _ => {
                return Err(RepositoryError::serialization(format!(
                    "expected a `{WRAPPED_KEY}` array"
                )));
            }
        },
        _ => {
            return Err(RepositoryError::serialization(
                "expected an array of quote requests",
            ));
        }
    };

    let total = records.len();
    let mut requests: Vec<QuoteRequest> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match QuoteRequest::deserialize(record) {
            Ok(request) => Some(request),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed quote request");
                None
            }
        })
        .collect();
    if requests.len() < total {
        debug!(skipped = total - requests.len(), total, "export partially decoded");
    }
    sort_for_source(&mut requests);
    Ok(requests)
}

/// Quote request source backed by a JSON export on disk.
#[derive(Debug, Clone)]
pub struct JsonFileQuoteRequestSource {
    path: PathBuf,
}

impl JsonFileQuoteRequestSource {
    /// Creates a source reading from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the export path.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl QuoteRequestSource for JsonFileQuoteRequestSource {
    async fn find_all(&self) -> RepositoryResult<Vec<QuoteRequest>> {
        let text = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            RepositoryError::connection(format!("{}: {e}", self.path.display()))
        })?;
        let requests = parse_export(&text)?;
        debug!(path = %self.path.display(), count = requests.len(), "loaded quote request export");
        Ok(requests)
    }

    async fn get(&self, id: &QuoteRequestId) -> RepositoryResult<Option<QuoteRequest>> {
        Ok(self
            .find_all()
            .await?
            .into_iter()
            .find(|request| request.id() == id))
    }
}
