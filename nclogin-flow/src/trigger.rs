//! Interactive "poll now" trigger source.
//!
//! Each line read from the input asks the scheduler to poll immediately,
//! except the reserved command keyword. Reading is blocking and cannot be
//! interrupted, so the source runs on its own OS thread and only notices
//! cancellation between reads: after cancellation it stays parked in the
//! current read until the next line or end-of-input arrives, then exits
//! without emitting anything.

use std::io::{self, BufRead};
use std::thread::{self, JoinHandle};

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Input keyword reserved for future commands. Currently ignored.
pub const RESERVED_COMMAND: &str = "cmd";

/// Why the trigger source stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerExit {
    /// The input reached end-of-input.
    EndOfInput,
    /// The flow was cancelled.
    Cancelled,
    /// The scheduler stopped listening for triggers.
    SchedulerGone,
    /// Reading the input failed.
    ReadError,
}

/// What a single input line asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Poll now.
    Trigger,
    /// Reserved command keyword; no action yet.
    Reserved,
}

impl InputAction {
    /// Classifies one input line.
    pub fn from_line(line: &str) -> Self {
        if line.trim() == RESERVED_COMMAND {
            Self::Reserved
        } else {
            Self::Trigger
        }
    }
}

/// Turns input lines into poll triggers.
pub struct TriggerSource<R> {
    reader: R,
    triggers: mpsc::Sender<()>,
    cancel: CancellationToken,
}

impl<R: BufRead + Send + 'static> TriggerSource<R> {
    /// Creates a trigger source feeding `triggers` until `cancel` fires.
    pub fn new(reader: R, triggers: mpsc::Sender<()>, cancel: CancellationToken) -> Self {
        Self {
            reader,
            triggers,
            cancel,
        }
    }

    /// Runs the source on a dedicated thread.
    pub fn spawn(self) -> io::Result<JoinHandle<TriggerExit>> {
        thread::Builder::new()
            .name("nclogin-trigger".to_string())
            .spawn(move || self.run())
    }

    /// Reads lines until end-of-input, cancellation, or the scheduler leaves.
    ///
    /// Emission never blocks: when a trigger is already queued the new one
    /// is folded into it.
    pub fn run(mut self) -> TriggerExit {
        // Raw bytes: a line that is not UTF-8 is still a trigger.
        let mut line = Vec::new();

        loop {
            if self.cancel.is_cancelled() {
                return TriggerExit::Cancelled;
            }

            line.clear();
            match self.reader.read_until(b'\n', &mut line) {
                Ok(0) => {
                    debug!("Trigger input reached end-of-input");
                    return TriggerExit::EndOfInput;
                }
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    debug!(error = %e, "Trigger input read failed");
                    return TriggerExit::ReadError;
                }
            }

            if self.cancel.is_cancelled() {
                return TriggerExit::Cancelled;
            }

            match InputAction::from_line(&String::from_utf8_lossy(&line)) {
                InputAction::Reserved => debug!("Reserved command ignored"),
                InputAction::Trigger => match self.triggers.try_send(()) {
                    Ok(()) => debug!("Poll requested"),
                    Err(TrySendError::Full(())) => debug!("Poll already requested"),
                    Err(TrySendError::Closed(())) => return TriggerExit::SchedulerGone,
                },
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
