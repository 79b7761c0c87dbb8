//! Error types for the mindful_core library.

use std::io;
use std::time::Duration;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for mindful_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The entry repository could not be read
    #[error("Repository unavailable: {0}")]
    RepositoryUnavailable(String),

    /// A record failed range validation before reaching the store
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Failure kinds of the external inference process.
///
/// These are absorbed by the recommendation resolver and never reach
/// callers of the insight operations.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    /// The process could not be located or started
    #[error("inference process unavailable: {0}")]
    Unavailable(String),

    /// The process did not finish within the configured wait
    #[error("inference process timed out after {0:?}")]
    Timeout(Duration),

    /// Stdout was not the expected JSON document
    #[error("inference protocol error: {0}")]
    Protocol(String),

    /// The process signalled an error (error field, exit status or stderr)
    #[error("inference process reported an error: {0}")]
    Reported(String),
}
