//! # Analytics Cache
//!
//! Memoizes [`AnalyticsReport`]s so repeated views over unchanged data do
//! not recompute every period.
//!
//! Entries are keyed by a fingerprint of the request list together with
//! the operator, period and evaluation instant, so any change to the
//! underlying data misses. The cache is bounded: once `capacity` entries
//! are held, the next insert clears it first.

use crate::domain::entities::quote_request::QuoteRequest;
use crate::domain::services::response_analytics::AnalyticsReport;
use crate::domain::value_objects::{OperatorCode, Period, Timestamp};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Hashes a request list, order included.
#[must_use]
pub fn fingerprint(requests: &[QuoteRequest]) -> u64 {
    let mut hasher = DefaultHasher::new();
    requests.hash(&mut hasher);
    hasher.finish()
}

/// Cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    fingerprint: u64,
    operator: Option<OperatorCode>,
    period: Period,
    as_of: Timestamp,
}

impl CacheKey {
    /// Creates a key for one evaluation.
    #[must_use]
    pub fn new(
        requests: &[QuoteRequest],
        operator: Option<&OperatorCode>,
        period: Period,
        as_of: Timestamp,
    ) -> Self {
        Self {
            fingerprint: fingerprint(requests),
            operator: operator.cloned(),
            period,
            as_of,
        }
    }
}

/// Hit and miss counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Lookups that found an entry.
    pub hits: u64,
    /// Lookups that did not.
    pub misses: u64,
    /// Entries currently held.
    pub entries: usize,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<CacheKey, Arc<AnalyticsReport>>,
    hits: u64,
    misses: u64,
}

/// Bounded report cache, safe to share between tasks.
#[derive(Debug)]
pub struct AnalyticsCache {
    capacity: usize,
    inner: Mutex<Inner>,
}

impl AnalyticsCache {
    /// Creates a cache holding at most `capacity` reports; `0` disables it.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Returns the capacity.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns true if the cache stores anything at all.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.capacity > 0
    }

    /// Looks up a report.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<AnalyticsReport>> {
        let mut inner = self.inner.lock();
        match inner.entries.get(key).cloned() {
            Some(report) => {
                inner.hits = inner.hits.saturating_add(1);
                Some(report)
            }
            None => {
                inner.misses = inner.misses.saturating_add(1);
                None
            }
        }
    }

    /// Stores a report, clearing the cache first if it is full.
    pub fn insert(&self, key: CacheKey, report: Arc<AnalyticsReport>) {
        if !self.is_enabled() {
            return;
        }
        let mut inner = self.inner.lock();
        if inner.entries.len() >= self.capacity && !inner.entries.contains_key(&key) {
            inner.entries.clear();
        }
        inner.entries.insert(key, report);
    }

    /// Returns the cached report for `key`, computing and storing it on a miss.
    pub fn get_or_insert_with(
        &self,
        key: CacheKey,
        compute: impl FnOnce() -> AnalyticsReport,
    ) -> Arc<AnalyticsReport> {
        if let Some(report) = self.get(&key) {
            return report;
        }
        let report = Arc::new(compute());
        self.insert(key, Arc::clone(&report));
        report
    }

    /// Drops every entry; counters are kept.
    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }

    /// Returns the number of cached reports.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    /// Returns hit/miss counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        CacheStats {
            hits: inner.hits,
            misses: inner.misses,
            entries: inner.entries.len(),
        }
    }
}

impl Default for AnalyticsCache {
    fn default() -> Self {
        Self::new(crate::infrastructure::config::DEFAULT_CACHE_CAPACITY)
    }
}
