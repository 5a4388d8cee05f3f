//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Maximum relative consistency must be a positive, finite percentage")]
    InvalidConsistencyThreshold,

    #[error("Log filter directive cannot be empty")]
    EmptyLogFilter,

    #[error("Invalid log filter directive: {0}")]
    InvalidLogFilter(String),
}
