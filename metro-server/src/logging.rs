//! Logging setup.
//!
//! # Environment Variables
//!
//! - `LOG_FORMAT`: `full` (default) or `compact`
//! - `RUST_LOG`: log filter (default: `info`)

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Log line layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Timestamp, level, target, fields.
    #[default]
    Full,
    /// Single abbreviated line per event.
    Compact,
}

impl LogFormat {
    /// Unknown values fall back to `Full`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "compact" => LogFormat::Compact,
            _ => LogFormat::Full,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Filter used when `RUST_LOG` is unset or invalid.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Full,
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        let format = std::env::var("LOG_FORMAT")
            .map(|v| LogFormat::parse(&v))
            .unwrap_or_default();
        let level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        Self { format, level }
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Full => registry.with(fmt::layer()).try_init(),
        LogFormat::Compact => registry.with(fmt::layer().compact()).try_init(),
    }
}
