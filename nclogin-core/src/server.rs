//! Server address normalization.
//!
//! Users type server addresses in many shapes (`cloud.example.com`,
//! `https://cloud.example.com/`, `example.org/nextcloud`). This module turns
//! them into a base [`Url`] and derives the login initiation endpoint from it.

use url::Url;

use crate::error::CoreError;

/// Path of the login initiation endpoint, relative to the server base.
pub const LOGIN_PATH: &str = "/index.php/login/v2";

/// A parsed server base address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerAddress {
    base: Url,
    scheme_defaulted: bool,
}

impl ServerAddress {
    /// Parses a user-supplied server address.
    ///
    /// An address without a `scheme://` prefix gets `default_scheme`
    /// prepended; [`scheme_defaulted`](Self::scheme_defaulted) reports when
    /// that happened.
    pub fn parse(input: &str, default_scheme: &str) -> Result<Self, CoreError> {
        let input = input.trim();
        let (candidate, scheme_defaulted) = if input.contains("://") {
            (input.to_string(), false)
        } else {
            (format!("{default_scheme}://{input}"), true)
        };

        let base = Url::parse(&candidate)?;
        if base.cannot_be_a_base() || base.host_str().is_none() {
            return Err(CoreError::InvalidUrl(url::ParseError::EmptyHost));
        }

        Ok(Self {
            base,
            scheme_defaulted,
        })
    }

    /// The normalized base URL.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Returns true if the scheme came from the default rather than the input.
    pub fn scheme_defaulted(&self) -> bool {
        self.scheme_defaulted
    }

    /// Returns true if requests to this server travel unencrypted.
    pub fn is_insecure(&self) -> bool {
        self.base.scheme() == "http"
    }

    /// The login initiation endpoint for this server.
    pub fn login_endpoint(&self) -> Url {
        let mut endpoint = self.base.clone();
        let path = format!("{}{}", self.base.path().trim_end_matches('/'), LOGIN_PATH);
        endpoint.set_path(&path);
        endpoint.set_query(None);
        endpoint.set_fragment(None);
        endpoint
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_scheme_uses_default() {
        let addr = ServerAddress::parse("cloud.example.com", "http").unwrap();
        assert!(addr.scheme_defaulted());
        assert!(addr.is_insecure());
        assert_eq!(
            addr.login_endpoint().as_str(),
            "http://cloud.example.com/index.php/login/v2"
        );
    }

    #[test]
    fn test_configured_default_scheme() {
        let addr = ServerAddress::parse("cloud.example.com:8443", "https").unwrap();
        assert!(!addr.is_insecure());
        assert_eq!(
            addr.login_endpoint().as_str(),
            "https://cloud.example.com:8443/index.php/login/v2"
        );
    }

    #[test]
    fn test_explicit_scheme_kept() {
        let addr = ServerAddress::parse("https://cloud.example.com/", "http").unwrap();
        assert!(!addr.scheme_defaulted());
        assert_eq!(
            addr.login_endpoint().as_str(),
            "https://cloud.example.com/index.php/login/v2"
        );
    }

    #[test]
    fn test_subdirectory_install() {
        let addr = ServerAddress::parse("https://example.org/nextcloud/?x=1#top", "http").unwrap();
        assert_eq!(
            addr.login_endpoint().as_str(),
            "https://example.org/nextcloud/index.php/login/v2"
        );
    }

    #[test]
    fn test_host_with_port_without_scheme() {
        // Without the "://" check this would parse as scheme "localhost".
        let addr = ServerAddress::parse("localhost:8080", "http").unwrap();
        assert_eq!(addr.base().host_str(), Some("localhost"));
        assert_eq!(addr.base().port(), Some(8080));
    }

    #[test]
    fn test_invalid_addresses() {
        assert!(ServerAddress::parse("", "http").is_err());
        assert!(ServerAddress::parse("http://", "http").is_err());
        assert!(ServerAddress::parse("https://exa mple.com", "http").is_err());
    }
}
