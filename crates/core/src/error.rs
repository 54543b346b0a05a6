//! Error types for the band overlay engine.
//!
//! The computation itself is total and never fails; errors only arise at the
//! settings boundary (parsing and validation on behalf of the editor).

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the band overlay engine.
#[derive(Error, Debug)]
pub enum Error {
    /// Settings error (out-of-contract configuration value).
    #[error("Settings error: {0}")]
    Settings(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a settings error.
    pub fn settings(msg: impl Into<String>) -> Self {
        Error::Settings(msg.into())
    }
}
