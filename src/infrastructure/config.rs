//! # Configuration
//!
//! Layered settings for the analytics service, loaded with the `config`
//! crate in this order (later wins):
//!
//! 1. built-in defaults
//! 2. an optional TOML or JSON file
//! 3. `CHARTER_ANALYTICS__*` environment variables, `__` separating
//!    nested keys (e.g. `CHARTER_ANALYTICS__THRESHOLDS__SIMILAR_PCT=15`)
//!
//! # Examples
//!
//! ```
//! use charter_analytics::infrastructure::config::AnalyticsConfig;
//!
//! let config = AnalyticsConfig::default()
//!     .with_cache_capacity(16)
//!     .with_similar_pct(5);
//! assert!(config.validate().is_ok());
//! ```

use crate::domain::services::comparison::ComparisonThresholds;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "CHARTER_ANALYTICS";

/// Separator between prefix and nested keys in environment variables.
pub const ENV_SEPARATOR: &str = "__";

/// Default number of cached reports.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Configuration loading or validation failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    /// A value is out of range.
    #[error("invalid configuration: {field}: {message}")]
    Invalid {
        /// Offending key.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },
}

impl ConfigError {
    /// Creates an invalid-value error.
    #[must_use]
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}

/// Analytics service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Comparison and trend thresholds.
    pub thresholds: ComparisonThresholds,
    /// Maximum cached reports; `0` disables caching.
    pub cache_capacity: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            thresholds: ComparisonThresholds::default(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl AnalyticsConfig {
    /// Loads defaults, then `path` if given, then the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be read or the result
    /// fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Like [`load`](Self::load) but reads environment variables from
    /// `env` instead of the process when given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be read or the result
    /// fails validation.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<::config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(true));
        }
        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true)
                .source(env),
        );

        let loaded: Self = builder.build()?.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.thresholds;
        if t.similar_pct >= t.significant_pct {
            return Err(ConfigError::invalid(
                "thresholds.similar_pct",
                format!(
                    "must be below significant_pct ({} >= {})",
                    t.similar_pct, t.significant_pct
                ),
            ));
        }
        if !t.trend_stable_pct.is_finite() || t.trend_stable_pct < 0.0 {
            return Err(ConfigError::invalid(
                "thresholds.trend_stable_pct",
                format!("must be a non-negative number, got {}", t.trend_stable_pct),
            ));
        }
        Ok(())
    }

    /// Sets the cache capacity.
    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Sets all thresholds.
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: ComparisonThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Sets the similar band.
    #[must_use]
    pub fn with_similar_pct(mut self, pct: u32) -> Self {
        self.thresholds.similar_pct = pct;
        self
    }

    /// Sets the significant-difference threshold.
    #[must_use]
    pub fn with_significant_pct(mut self, pct: u32) -> Self {
        self.thresholds.significant_pct = pct;
        self
    }

    /// Sets the trend stability threshold.
    #[must_use]
    pub fn with_trend_stable_pct(mut self, pct: f64) -> Self {
        self.thresholds.trend_stable_pct = pct;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> Option<::config::Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    fn file_with(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    mod defaults {
        use super::*;

        #[test]
        fn default_values() {
            let config = AnalyticsConfig::default();
            assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);
            assert_eq!(config.thresholds, ComparisonThresholds::default());
            assert!(config.validate().is_ok());
        }

        #[test]
        fn load_without_sources_yields_defaults() {
            let config = AnalyticsConfig::load_with_env(None, env(&[])).unwrap();
            assert_eq!(config, AnalyticsConfig::default());
        }
    }

    mod layering {
        use super::*;

        #[test]
        fn toml_file_overrides_defaults() {
            let file = file_with(
                ".toml",
                "cache_capacity = 8\n\n[thresholds]\nsimilar_pct = 15\n",
            );
            let config = AnalyticsConfig::load_with_env(Some(file.path()), env(&[])).unwrap();

            assert_eq!(config.cache_capacity, 8);
            assert_eq!(config.thresholds.similar_pct, 15);
            assert_eq!(config.thresholds.significant_pct, 30);
        }

        #[test]
        fn json_file_is_accepted() {
            let file = file_with(".json", r#"{ "thresholds": { "trend_stable_pct": 2.5 } }"#);
            let config = AnalyticsConfig::load_with_env(Some(file.path()), env(&[])).unwrap();
            assert!((config.thresholds.trend_stable_pct - 2.5).abs() < f64::EPSILON);
        }

        #[test]
        fn environment_overrides_file() {
            let file = file_with(".toml", "cache_capacity = 8\n");
            let config = AnalyticsConfig::load_with_env(
                Some(file.path()),
                env(&[
                    ("CHARTER_ANALYTICS__CACHE_CAPACITY", "3"),
                    ("CHARTER_ANALYTICS__THRESHOLDS__SIGNIFICANT_PCT", "40"),
                ]),
            )
            .unwrap();

            assert_eq!(config.cache_capacity, 3);
            assert_eq!(config.thresholds.significant_pct, 40);
        }

        #[test]
        fn missing_file_fails() {
            let dir = tempfile::tempdir().unwrap();
            let result =
                AnalyticsConfig::load_with_env(Some(&dir.path().join("none.toml")), env(&[]));
            assert!(matches!(result, Err(ConfigError::Load(_))));
        }
    }

    mod validation {
        use super::*;

        #[test]
        fn similar_must_be_below_significant() {
            let config = AnalyticsConfig::default()
                .with_similar_pct(30)
                .with_significant_pct(30);
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("similar_pct"));
        }

        #[test]
        fn trend_threshold_must_be_finite() {
            let config = AnalyticsConfig::default().with_trend_stable_pct(f64::NAN);
            assert!(config.validate().is_err());

            let config = AnalyticsConfig::default().with_trend_stable_pct(-1.0);
            assert!(config.validate().is_err());
        }

        #[test]
        fn invalid_file_values_are_rejected_on_load() {
            let file = file_with(".toml", "[thresholds]\nsimilar_pct = 50\n");
            let result = AnalyticsConfig::load_with_env(Some(file.path()), env(&[]));
            assert!(matches!(result, Err(ConfigError::Invalid { .. })));
        }
    }
}
