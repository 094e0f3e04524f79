//! JSON output formatting.

use anyhow::Result;
use chrono::{DateTime, Utc};
use nclogin_core::Credentials;
use serde::{Serialize, Serializer};

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for a completed login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsOutput {
    pub server: String,
    pub login_name: String,
    pub app_password: String,
    #[serde(serialize_with = "serialize_datetime")]
    pub obtained_at: DateTime<Utc>,
}

impl CredentialsOutput {
    /// Creates output for credentials obtained at `obtained_at`.
    pub fn new(creds: &Credentials, obtained_at: DateTime<Utc>) -> Self {
        Self {
            server: creds.server.clone(),
            login_name: creds.login_name.clone(),
            app_password: creds.app_password.clone(),
            obtained_at,
        }
    }
}

// ============================================================================
// Serialization helpers
// ============================================================================

fn serialize_datetime<S>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&dt.to_rfc3339())
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats login credentials.
    pub fn format_credentials(
        &self,
        creds: &Credentials,
        obtained_at: DateTime<Utc>,
    ) -> Result<String> {
        self.format(&CredentialsOutput::new(creds, obtained_at))
    }
}
