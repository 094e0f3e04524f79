//! Text output formatting with optional colors.

use nclogin_core::Credentials;
use nclogin_flow::AuthError;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Formats a completed login.
    pub fn format_credentials(&self, creds: &Credentials) -> String {
        let mut lines = Vec::new();

        lines.push(format!(
            "{} Logged in as {}",
            self.paint(GREEN, "✓"),
            self.paint(BOLD, &creds.login_name)
        ));
        lines.push(format!("  Server:       {}", creds.server));
        lines.push(format!("  Login name:   {}", creds.login_name));
        lines.push(format!("  App password: {}", creds.app_password));

        lines.join("\n")
    }

    /// Formats a failed login.
    pub fn format_error(&self, err: &AuthError) -> String {
        format!("{} Login failed: {}", self.paint(RED, "✗"), err)
    }
}
