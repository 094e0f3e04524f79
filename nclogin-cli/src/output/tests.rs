//! CLI output formatting tests.
//!
//! These tests verify that CLI output is correctly formatted for both
//! text and JSON output modes.

fn sample_credentials() -> nclogin_core::Credentials {
    nclogin_core::Credentials {
        server: "https://cloud.example".to_string(),
        login_name: "alice".to_string(),
        app_password: "secret".to_string(),
    }
}

#[cfg(test)]
mod text_formatter_tests {
    use super::super::text::TextFormatter;
    use super::sample_credentials;
    use nclogin_flow::{AuthError, Stage};

    #[test]
    fn test_credentials_plain() {
        let formatter = TextFormatter::new(false);
        let output = formatter.format_credentials(&sample_credentials());

        assert!(output.starts_with("✓ Logged in as alice"));
        assert!(output.contains("Server:       https://cloud.example"));
        assert!(output.contains("App password: secret"));
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn test_credentials_colored() {
        let formatter = TextFormatter::new(true);
        let output = formatter.format_credentials(&sample_credentials());

        assert!(output.contains("\x1b[32m✓\x1b[0m"));
        assert!(output.contains("\x1b[1malice\x1b[0m"));
    }

    #[test]
    fn test_error_line() {
        let formatter = TextFormatter::new(false);
        let err = AuthError::HttpStatus {
            stage: Stage::Poll,
            status: 500,
        };

        assert_eq!(
            formatter.format_error(&err),
            "✗ Login failed: Server returned HTTP 500 during login polling"
        );
    }
}

#[cfg(test)]
mod json_formatter_tests {
    use super::super::json::JsonFormatter;
    use super::sample_credentials;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_format_pretty_json() {
        let formatter = JsonFormatter::new(true);

        let data = serde_json::json!({"key": "value"});
        let output = formatter.format(&data).unwrap();

        assert!(output.contains('\n'));
        assert!(output.contains("  "));
    }

    #[test]
    fn test_format_compact_json() {
        let formatter = JsonFormatter::new(false);

        let data = serde_json::json!({"key": "value"});
        let output = formatter.format(&data).unwrap();

        assert_eq!(output, r#"{"key":"value"}"#);
    }

    #[test]
    fn test_format_credentials() {
        let formatter = JsonFormatter::new(false);
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();

        let output = formatter.format_credentials(&sample_credentials(), at).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["server"], "https://cloud.example");
        assert_eq!(parsed["loginName"], "alice");
        assert_eq!(parsed["appPassword"], "secret");
        assert_eq!(parsed["obtainedAt"], "2026-10-18T12:00:00+00:00");
    }
}
