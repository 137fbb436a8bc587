//! # Application Errors
//!
//! Error types for the application layer.
//!
//! The analytics computation itself cannot fail; everything here comes
//! from loading data, loading configuration, or rejecting bad input.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Repository(RepositoryError)  - Quote request source failures
//! ├── Configuration(ConfigError)   - Settings could not be loaded
//! ├── Serialization(String)        - Report encoding failures
//! └── Validation(String)           - Input validation failures
//! ```
//!
//! # Examples
//!
//! ```
//! use charter_analytics::application::error::ApplicationError;
//! use charter_analytics::infrastructure::persistence::RepositoryError;
//!
//! let err = ApplicationError::validation("operator code must not be empty");
//! assert!(err.is_validation());
//!
//! let err: ApplicationError = RepositoryError::connection("export unreadable").into();
//! assert!(err.is_retryable());
//! ```

use crate::infrastructure::config::ConfigError;
use crate::infrastructure::persistence::RepositoryError;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// The quote request source failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Configuration could not be loaded or is invalid.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// A report could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Request validation failed.
    #[error("validation error: {0}")]
    Validation(String),
}

impl ApplicationError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Returns true if retrying the same call may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Repository(RepositoryError::Connection(_)))
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<serde_json::Error> for ApplicationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
