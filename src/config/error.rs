//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Logging initialization failed: {0}")]
    LoggingInit(String),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Consistency threshold must be in (0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error("Tolerance '{name}' must be a positive finite number, got {value}")]
    InvalidTolerance { name: &'static str, value: f64 },

    #[error("Invalid log filter directive: {0}")]
    InvalidLogFilter(String),
}
