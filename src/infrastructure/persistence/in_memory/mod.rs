//! # In-Memory Sources
//!
//! In-memory implementations for testing without an external store.

pub mod quote_request_source;

pub use quote_request_source::InMemoryQuoteRequestSource;
