//! Core error types for `nclogin`.

use thiserror::Error;

/// Core error type for `nclogin` operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A server address or a URL returned by the server could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A response body was not the expected JSON shape.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
