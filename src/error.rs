//! Error types for Frey
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Fixed marker at the start of every data-read failure message.
///
/// Callers distinguish parse errors (a user-input problem, HTTP 400) from
/// downstream errors (HTTP 500) by this prefix, so it must stay stable.
pub const READ_FAILURE_PREFIX: &str = "Failed to read data";

/// Main error type for Frey operations
///
/// This enum encompasses all possible errors that can occur during
/// data summarization, prompt composition, provider calls, and
/// configuration loading.
#[derive(Error, Debug)]
pub enum FreyError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Tabular input could not be parsed into a non-empty table
    ///
    /// The rendered message starts with [`READ_FAILURE_PREFIX`].
    #[error("Failed to read data: {0}")]
    DataRead(String),

    /// Provider-related errors (API calls, malformed responses, quota)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Missing credentials for the generation service
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl FreyError {
    /// Whether this error is a data-read failure (a user-input problem)
    pub fn is_data_read(&self) -> bool {
        matches!(self, Self::DataRead(_))
    }
}

/// Result type alias for Frey operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
