//! Configuration file handling.
//!
//! The file is optional JSON at `<config dir>/nclogin/config.json`. Every
//! field has a default, and command-line flags override what it says.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use nclogin_flow::{DEFAULT_SCHEME, FlowSettings};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Client identifier sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("nclogin/", env!("CARGO_PKG_VERSION"));

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Server to log in to when none is given on the command line.
    #[serde(default)]
    pub server: Option<String>,
    /// Client identifier shown to the user in the server's security settings.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Scheme assumed for server addresses without one.
    #[serde(default = "default_scheme")]
    pub default_scheme: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// First wait between timer-driven polls, in seconds.
    #[serde(default = "default_initial_interval_secs")]
    pub initial_interval_secs: f64,
    /// Minimum seconds between two polls.
    #[serde(default = "default_min_poll_spacing_secs")]
    pub min_poll_spacing_secs: f64,
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_scheme() -> String {
    DEFAULT_SCHEME.to_string()
}

fn default_request_timeout_secs() -> u64 {
    FlowSettings::default().request_timeout.as_secs()
}

fn default_initial_interval_secs() -> f64 {
    5.0
}

fn default_min_poll_spacing_secs() -> f64 {
    1.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: None,
            user_agent: default_user_agent(),
            default_scheme: default_scheme(),
            request_timeout_secs: default_request_timeout_secs(),
            initial_interval_secs: default_initial_interval_secs(),
            min_poll_spacing_secs: default_min_poll_spacing_secs(),
        }
    }
}

impl Config {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nclogin")
            .join("config.json")
    }

    /// Loads configuration from a specific path.
    ///
    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Builds flow settings from this configuration.
    pub fn to_settings(&self) -> Result<FlowSettings> {
        let scheme = self.default_scheme.trim();
        let valid_char = |c: char| c.is_ascii_alphanumeric() || "+-.".contains(c);
        if scheme.is_empty() || !scheme.chars().all(valid_char) {
            bail!("Invalid default scheme: {:?}", self.default_scheme);
        }
        if self.request_timeout_secs == 0 {
            bail!("requestTimeoutSecs must be positive, got 0");
        }

        Ok(FlowSettings::builder()
            .default_scheme(scheme)
            .initial_interval(secs("initialIntervalSecs", self.initial_interval_secs)?)
            .min_poll_spacing(secs("minPollSpacingSecs", self.min_poll_spacing_secs)?)
            .request_timeout(Duration::from_secs(self.request_timeout_secs))
            .build())
    }
}

fn secs(field: &str, value: f64) -> Result<Duration> {
    let duration = Duration::try_from_secs_f64(value)
        .with_context(|| format!("{field} must be a positive number of seconds, got {value}"))?;
    if duration.is_zero() {
        bail!("{field} must be a positive number of seconds, got {value}");
    }
    Ok(duration)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"server": "cloud.example", "defaultScheme": "https", "initialIntervalSecs": 2.5}"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.server.as_deref(), Some("cloud.example"));
        assert_eq!(config.default_scheme, "https");
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);

        let settings = config.to_settings().unwrap();
        assert_eq!(settings.initial_interval, Duration::from_millis(2500));
        assert_eq!(settings.min_poll_spacing, Duration::from_secs(1));
        assert_eq!(settings.request_timeout, FlowSettings::default().request_timeout);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{server:").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_negative_interval_rejected() {
        let config = Config {
            initial_interval_secs: -1.0,
            ..Config::default()
        };
        assert!(config.to_settings().is_err());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = Config {
            initial_interval_secs: 0.0,
            ..Config::default()
        };
        assert!(config.to_settings().is_err());
    }

    #[test]
    fn test_zero_spacing_rejected() {
        let config = Config {
            min_poll_spacing_secs: 0.0,
            ..Config::default()
        };
        assert!(config.to_settings().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = Config {
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert!(config.to_settings().is_err());
    }

    #[test]
    fn test_all_zero_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"initialIntervalSecs": 0, "minPollSpacingSecs": 0, "requestTimeoutSecs": 0}"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.to_settings().is_err());
    }

    #[test]
    fn test_bad_scheme_rejected() {
        let config = Config {
            default_scheme: "ht tp".to_string(),
            ..Config::default()
        };
        assert!(config.to_settings().is_err());
    }

    #[test]
    fn test_default_path_ends_with_app_dir() {
        let path = Config::default_path();
        assert!(path.ends_with("nclogin/config.json"));
    }
}
