//! # Source Traits
//!
//! Port definitions for loading quote requests.
//!
//! The analytics service only ever reads: a source hands back the full
//! set of quote requests the marketplace currently holds, and period
//! filtering happens in the domain.
//!
//! # Examples
//!
//! ```ignore
//! use charter_analytics::infrastructure::persistence::traits::QuoteRequestSource;
//!
//! async fn count(source: &impl QuoteRequestSource) {
//!     let requests = source.find_all().await.unwrap();
//!     println!("Loaded {} quote requests", requests.len());
//! }
//! ```

use crate::domain::entities::quote_request::QuoteRequest;
use crate::domain::value_objects::{OperatorCode, QuoteRequestId};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for source operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The backing store could not be reached or read.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A record could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepositoryError {
    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}

/// Result type for source operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Read-only source of quote requests.
///
/// Implementations return requests ordered by creation time (oldest
/// first, undated last) and then by id, so that downstream tie-breaking
/// is reproducible.
#[async_trait]
pub trait QuoteRequestSource: Send + Sync + fmt::Debug {
    /// Returns every quote request.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backing store cannot be read.
    async fn find_all(&self) -> RepositoryResult<Vec<QuoteRequest>>;

    /// Gets a quote request by ID.
    ///
    /// Returns `None` if the request does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backing store cannot be read.
    async fn get(&self, id: &QuoteRequestId) -> RepositoryResult<Option<QuoteRequest>>;

    /// Returns the requests `operator` made at least one offer on.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backing store cannot be read.
    async fn find_by_operator(&self, operator: &OperatorCode) -> RepositoryResult<Vec<QuoteRequest>> {
        Ok(self
            .find_all()
            .await?
            .into_iter()
            .filter(|request| request.offer_from(operator).is_some())
            .collect())
    }

    /// Counts quote requests.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backing store cannot be read.
    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.find_all().await?.len() as u64)
    }
}

/// Orders requests the way every source returns them.
pub(crate) fn sort_for_source(requests: &mut [QuoteRequest]) {
    requests.sort_by(|a, b| {
        match (a.created_at(), b.created_at()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }
        .then_with(|| a.id().cmp(b.id()))
    });
}
