//! App credentials delivered by a completed login.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Credentials returned by the poll endpoint once the user has logged in.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Server URL the client should use from now on.
    pub server: String,
    /// Login name of the authenticated user.
    pub login_name: String,
    /// Application password issued for this client.
    pub app_password: String,
}

impl Credentials {
    /// Parses a successful poll response body.
    pub fn from_json(body: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(body)?)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("server", &self.server)
            .field("login_name", &self.login_name)
            .field("app_password", &"<redacted>")
            .finish()
    }
}
