//! Login session types.
//!
//! The initiation endpoint answers with:
//!
//! ```json
//! {"poll": {"token": "...", "endpoint": "https://.../login/v2/poll"}, "login": "https://.../login/v2/flow/..."}
//! ```

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::CoreError;

// ============================================================================
// Wire Types
// ============================================================================

/// Body of a successful login initiation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitiateResponse {
    /// Polling parameters.
    pub poll: PollInfo,
    /// Browser-facing login URL.
    pub login: String,
}

/// Polling parameters from the initiation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollInfo {
    /// Opaque token identifying this login attempt.
    pub token: String,
    /// Endpoint to poll for completion.
    pub endpoint: String,
}

// ============================================================================
// Login Session
// ============================================================================

/// A login attempt in progress.
///
/// Immutable once obtained; shared read-only with the poll scheduler.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginSession {
    poll_token: String,
    poll_endpoint: Url,
    login_url: Url,
}

impl LoginSession {
    /// Creates a session from its parts.
    pub fn new(poll_token: impl Into<String>, poll_endpoint: Url, login_url: Url) -> Self {
        Self {
            poll_token: poll_token.into(),
            poll_endpoint,
            login_url,
        }
    }

    /// Parses an initiation response body.
    pub fn from_json(body: &str) -> Result<Self, CoreError> {
        let response: InitiateResponse = serde_json::from_str(body)?;
        Self::try_from(response)
    }

    /// The opaque poll token.
    pub fn poll_token(&self) -> &str {
        &self.poll_token
    }

    /// The endpoint polled for completion.
    pub fn poll_endpoint(&self) -> &Url {
        &self.poll_endpoint
    }

    /// The URL the user opens in a browser.
    pub fn login_url(&self) -> &Url {
        &self.login_url
    }
}

impl TryFrom<InitiateResponse> for LoginSession {
    type Error = CoreError;

    fn try_from(response: InitiateResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            poll_token: response.poll.token,
            poll_endpoint: Url::parse(&response.poll.endpoint)?,
            login_url: Url::parse(&response.login)?,
        })
    }
}

// The poll token is a credential for the login attempt.
impl std::fmt::Debug for LoginSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginSession")
            .field("poll_token", &"<redacted>")
            .field("poll_endpoint", &self.poll_endpoint.as_str())
            .field("login_url", &self.login_url.as_str())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
