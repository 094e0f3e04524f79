//! Login flow error types.

use std::fmt;

use nclogin_core::CoreError;
use thiserror::Error;

// ============================================================================
// Stage
// ============================================================================

/// Which request of the flow an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The one-shot login initiation request.
    Initiate,
    /// A request to the poll endpoint.
    Poll,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initiate => write!(f, "login initiation"),
            Self::Poll => write!(f, "login polling"),
        }
    }
}

// ============================================================================
// Auth Error
// ============================================================================

/// Error type for the login flow.
///
/// Every variant is terminal: the flow delivers it once and stops.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The server address or a URL returned by the server is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request could not be sent or no response arrived.
    #[error("Network error during {stage}: {source}")]
    Network {
        /// Request that failed.
        stage: Stage,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with an unexpected status code.
    #[error("Server returned HTTP {status} during {stage}")]
    HttpStatus {
        /// Request that failed.
        stage: Stage,
        /// Status code returned.
        status: u16,
    },

    /// The response body could not be read.
    #[error("Failed to read response body during {stage}: {source}")]
    BodyRead {
        /// Request that failed.
        stage: Stage,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The response body was not the expected JSON.
    #[error("Invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// A flow setting is out of range.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),

    /// The caller cancelled the flow before it finished.
    #[error("Login cancelled")]
    Cancelled,

    /// Every producer went away without delivering a result.
    #[error("Login flow ended without a result")]
    Abandoned,
}

impl AuthError {
    /// Returns the HTTP status code if this is a status error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the caller cancelled the flow.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<CoreError> for AuthError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidUrl(e) => Self::InvalidUrl(e),
            CoreError::Serialization(e) => Self::Json(e),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
