//! # Persistence Layer
//!
//! Read-only quote request sources.
//!
//! ## Port
//!
//! - [`QuoteRequestSource`]: loads quote requests for analysis
//!
//! ## Implementations
//!
//! - [`in_memory::InMemoryQuoteRequestSource`]: `DashMap`-backed, for tests and embedding
//! - [`json_file::JsonFileQuoteRequestSource`]: a document-database JSON export on disk

pub mod in_memory;
pub mod json_file;
pub mod traits;

pub use traits::{QuoteRequestSource, RepositoryError, RepositoryResult};
