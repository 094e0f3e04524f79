//! User-facing prompts.
//!
//! Prompts are best-effort: a failed write is logged and otherwise ignored,
//! so a closed terminal never stalls the flow.

use std::fmt::Display;
use std::io::Write;
use std::sync::Mutex;

use tracing::warn;
use url::Url;

/// Shared writer for the prompts of one login flow.
pub struct Prompter {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl Prompter {
    /// Creates a prompter writing to `sink`.
    pub fn new(sink: impl Write + Send + 'static) -> Self {
        Self {
            sink: Mutex::new(Box::new(sink)),
        }
    }

    /// Writes one line.
    pub fn line(&self, message: impl Display) {
        let mut sink = match self.sink.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(sink, "{message}").and_then(|()| sink.flush()) {
            warn!(error = %e, "Failed to write prompt");
        }
    }

    /// Announces the start of the flow.
    pub fn initiating(&self) {
        self.line("Press Ctrl+C to exit ...");
        self.line("Initiating login...");
    }

    /// Shows the browser login URL and how to request an immediate poll.
    pub fn login_link(&self, login_url: &Url) {
        self.line(format_args!(
            "Open this link in your browser and log in: {login_url}"
        ));
        self.line("Press Enter to check for login again ...");
    }

    /// Announces a poll request.
    pub fn polling(&self) {
        self.line("Checking for login...");
    }
}

impl std::fmt::Debug for Prompter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prompter").finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io;
    use std::sync::Arc;

    /// In-memory sink whose contents stay readable after being moved into a prompter.
    #[derive(Clone, Default)]
    pub(crate) struct SharedBuffer(pub(crate) Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn test_login_link_prompt() {
        let buffer = SharedBuffer::default();
        let prompter = Prompter::new(buffer.clone());

        prompter.login_link(&Url::parse("https://cloud.example/login/v2/flow/abc").unwrap());

        let out = buffer.contents();
        assert!(out.contains("https://cloud.example/login/v2/flow/abc"));
        assert!(out.contains("Press Enter"));
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn test_write_failure_is_ignored() {
        let prompter = Prompter::new(BrokenPipe);
        prompter.initiating();
        prompter.polling();
    }
}
