//! # In-Memory Quote Request Source
//!
//! In-memory implementation of [`QuoteRequestSource`] for tests and for
//! feeding exported data into the analytics service.
//!
//! Uses [`DashMap`] for thread-safe concurrent access, keyed by quote
//! request id.
//!
//! # Examples
//!
//! ```
//! use charter_analytics::domain::entities::QuoteRequestBuilder;
//! use charter_analytics::domain::value_objects::RequestCode;
//! use charter_analytics::infrastructure::persistence::in_memory::InMemoryQuoteRequestSource;
//!
//! let source = InMemoryQuoteRequestSource::new();
//! source.insert(QuoteRequestBuilder::new(RequestCode::new("QR-1")).build());
//! assert_eq!(source.len(), 1);
//! ```

use crate::domain::entities::quote_request::QuoteRequest;
use crate::domain::value_objects::QuoteRequestId;
use crate::infrastructure::persistence::traits::{
    QuoteRequestSource, RepositoryResult, sort_for_source,
};
use async_trait::async_trait;
use dashmap::DashMap;

/// In-memory quote request source.
///
/// # Thread Safety
///
/// This implementation is thread-safe via `DashMap` and can be shared
/// across async tasks.
#[derive(Debug, Default)]
pub struct InMemoryQuoteRequestSource {
    requests: DashMap<QuoteRequestId, QuoteRequest>,
}

impl InMemoryQuoteRequestSource {
    /// Creates a new empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source holding `requests`.
    #[must_use]
    pub fn with_requests(requests: impl IntoIterator<Item = QuoteRequest>) -> Self {
        let source = Self::new();
        source.extend(requests);
        source
    }

    /// Inserts or replaces a request, returning the previous one with the same id.
    pub fn insert(&self, request: QuoteRequest) -> Option<QuoteRequest> {
        self.requests.insert(request.id().clone(), request)
    }

    /// Inserts every request.
    pub fn extend(&self, requests: impl IntoIterator<Item = QuoteRequest>) {
        for request in requests {
            self.insert(request);
        }
    }

    /// Removes a request.
    pub fn remove(&self, id: &QuoteRequestId) -> Option<QuoteRequest> {
        self.requests.remove(id).map(|(_, request)| request)
    }

    /// Removes every request.
    pub fn clear(&self) {
        self.requests.clear();
    }

    /// Returns the number of stored requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Returns true if no requests are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

#[async_trait]
impl QuoteRequestSource for InMemoryQuoteRequestSource {
    async fn find_all(&self) -> RepositoryResult<Vec<QuoteRequest>> {
        let mut requests: Vec<QuoteRequest> = self
            .requests
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        sort_for_source(&mut requests);
        Ok(requests)
    }

    async fn get(&self, id: &QuoteRequestId) -> RepositoryResult<Option<QuoteRequest>> {
        Ok(self.requests.get(id).map(|entry| entry.value().clone()))
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.requests.len() as u64)
    }
}
