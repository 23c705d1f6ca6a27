//! Configuration error types.

use thiserror::Error;

/// Errors raised while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Errors raised by semantic validation of loaded values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("server port must not be 0")]
    InvalidPort,

    #[error("request timeout must be between 1 and 300 seconds")]
    InvalidTimeout,

    #[error("table name '{0}' must not be empty")]
    EmptyTableName(&'static str),

    #[error("event bus name must not be empty")]
    EmptyBusName,

    #[error("check-in window minutes must not be negative")]
    NegativeWindow,

    #[error("default check-in radius must be positive")]
    InvalidRadius,
}
