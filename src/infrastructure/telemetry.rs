//! # Telemetry
//!
//! Tracing subscriber setup. Filtering follows `RUST_LOG`, defaulting to
//! `info` when unset.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Builds the env filter used by [`init_tracing`].
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy()
}

/// Installs the global subscriber, writing to stderr.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing(format: LogFormat) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Pretty => builder.try_init().is_ok(),
        LogFormat::Json => builder.json().with_ansi(false).try_init().is_ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_reports_existing_subscriber() {
        let _ = init_tracing(LogFormat::Pretty);
        assert!(!init_tracing(LogFormat::Json));
    }
}
