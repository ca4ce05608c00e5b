// src/logging.rs

//! `tracing` subscriber setup for demos and tests.
//!
//! The library itself only emits events; binaries call [`init`] once to
//! see them. Filtering follows `RUST_LOG` unless explicit directives are
//! configured.

use std::error::Error;
use std::fmt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt as tracing_fmt};

/// How the subscriber should behave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Explicit directives such as `haiqu=debug`. Overrides `RUST_LOG`.
    pub directives: Option<String>,
    /// Used when neither `directives` nor `RUST_LOG` is set.
    pub default_directive: String,
    /// Show module paths in output.
    pub include_targets: bool,
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { directives: None, default_directive: "info".to_string(), include_targets: true, ansi: true }
    }
}

impl LoggingConfig {
    /// Plain output for captured test logs.
    pub fn for_tests() -> Self {
        Self { default_directive: "debug".to_string(), ansi: false, ..Self::default() }
    }

    fn resolve_filter(&self) -> Result<EnvFilter, LoggingError> {
        match &self.directives {
            Some(directives) => EnvFilter::try_new(directives).map_err(|err| LoggingError::InvalidFilter(err.to_string())),
            None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_directive))),
        }
    }
}

/// Failures while installing the subscriber.
#[derive(Debug)]
pub enum LoggingError {
    /// The directive string could not be parsed.
    InvalidFilter(String),
    /// A global subscriber is already installed.
    AlreadyInitialized(tracing_subscriber::util::TryInitError),
}

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggingError::InvalidFilter(msg) => write!(f, "invalid tracing directive: {}", msg),
            LoggingError::AlreadyInitialized(err) => write!(f, "failed to install tracing subscriber: {}", err),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LoggingError::AlreadyInitialized(err) => Some(err),
            LoggingError::InvalidFilter(_) => None,
        }
    }
}

/// Installs a formatted subscriber as the process-wide default.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    tracing_fmt()
        .with_env_filter(config.resolve_filter()?)
        .with_target(config.include_targets)
        .with_ansi(config.ansi)
        .finish()
        .try_init()
        .map_err(LoggingError::AlreadyInitialized)
}

/// Like [`init`], but a second call is a no-op instead of an error.
pub fn try_init(config: &LoggingConfig) -> Result<(), LoggingError> {
    match init(config) {
        Err(LoggingError::AlreadyInitialized(_)) => Ok(()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_directive_rejected() {
        let config = LoggingConfig { directives: Some("haiqu=loudest".to_string()), ..LoggingConfig::default() };
        assert!(matches!(init(&config), Err(LoggingError::InvalidFilter(_))));
    }

    #[test]
    fn test_repeat_try_init_is_ok() {
        assert!(try_init(&LoggingConfig::for_tests()).is_ok());
        assert!(try_init(&LoggingConfig::for_tests()).is_ok());
    }
}
