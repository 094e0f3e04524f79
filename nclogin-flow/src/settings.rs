//! Settings for the login flow.

use std::time::Duration;

use nclogin_core::interval::DEFAULT_BASE_SECS;

use crate::error::AuthError;

/// Scheme assumed for server addresses typed without one.
///
/// Plain `http` matches what existing deployments expect. It is a weaker
/// default: a warning is logged every time it is applied.
pub const DEFAULT_SCHEME: &str = "http";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Minimum spacing between two poll requests, in seconds.
const DEFAULT_MIN_POLL_SPACING_SECS: u64 = 1;

// ============================================================================
// Flow Settings
// ============================================================================

/// Settings for a login flow.
#[derive(Debug, Clone)]
pub struct FlowSettings {
    /// Scheme prepended to server addresses that have none.
    pub default_scheme: String,
    /// First wait between timer-driven polls; also the base of the backoff.
    pub initial_interval: Duration,
    /// Minimum time between the end of one poll and the start of the next.
    pub min_poll_spacing: Duration,
    /// Timeout for each HTTP request.
    pub request_timeout: Duration,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            default_scheme: DEFAULT_SCHEME.to_string(),
            initial_interval: Duration::from_secs_f64(DEFAULT_BASE_SECS),
            min_poll_spacing: Duration::from_secs(DEFAULT_MIN_POLL_SPACING_SECS),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl FlowSettings {
    /// Creates a builder for customizing the settings.
    pub fn builder() -> FlowSettingsBuilder {
        FlowSettingsBuilder::new()
    }

    /// Checks that every duration is positive and a scheme is set.
    pub fn validate(&self) -> Result<(), AuthError> {
        let durations = [
            ("initial_interval", self.initial_interval),
            ("min_poll_spacing", self.min_poll_spacing),
            ("request_timeout", self.request_timeout),
        ];
        for (name, value) in durations {
            if value.is_zero() {
                return Err(AuthError::InvalidSettings(format!("{name} must be positive")));
            }
        }
        if self.default_scheme.trim().is_empty() {
            return Err(AuthError::InvalidSettings("default_scheme must not be empty".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// Flow Settings Builder
// ============================================================================

/// Builder for constructing [`FlowSettings`].
#[derive(Debug, Default)]
pub struct FlowSettingsBuilder {
    settings: FlowSettings,
}

impl FlowSettingsBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scheme used when an address has none.
    pub fn default_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.settings.default_scheme = scheme.into();
        self
    }

    /// Sets the first timer-driven poll interval.
    pub fn initial_interval(mut self, interval: Duration) -> Self {
        self.settings.initial_interval = interval;
        self
    }

    /// Sets the debounce cooldown between polls.
    pub fn min_poll_spacing(mut self, spacing: Duration) -> Self {
        self.settings.min_poll_spacing = spacing;
        self
    }

    /// Sets the per-request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.settings.request_timeout = timeout;
        self
    }

    /// Builds the settings.
    pub fn build(self) -> FlowSettings {
        self.settings
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = FlowSettings::default();
        assert_eq!(settings.default_scheme, "http");
        assert_eq!(settings.initial_interval, Duration::from_secs(5));
        assert_eq!(settings.min_poll_spacing, Duration::from_secs(1));
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_builder() {
        let settings = FlowSettings::builder()
            .default_scheme("https")
            .initial_interval(Duration::from_millis(200))
            .min_poll_spacing(Duration::from_millis(50))
            .request_timeout(Duration::from_secs(5))
            .build();

        assert_eq!(settings.default_scheme, "https");
        assert_eq!(settings.initial_interval, Duration::from_millis(200));
        assert_eq!(settings.min_poll_spacing, Duration::from_millis(50));
        assert_eq!(settings.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(FlowSettings::default().validate().is_ok());
    }

    #[test]
    fn test_zero_durations_rejected() {
        let zero_interval = FlowSettings::builder().initial_interval(Duration::ZERO).build();
        let zero_spacing = FlowSettings::builder().min_poll_spacing(Duration::ZERO).build();
        let zero_timeout = FlowSettings::builder().request_timeout(Duration::ZERO).build();

        for settings in [zero_interval, zero_spacing, zero_timeout] {
            assert!(matches!(settings.validate(), Err(AuthError::InvalidSettings(_))));
        }
    }

    #[test]
    fn test_empty_scheme_rejected() {
        let settings = FlowSettings::builder().default_scheme(" ").build();
        assert!(settings.validate().is_err());
    }
}
