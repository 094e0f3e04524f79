//! Single-result completion gate.
//!
//! Several producers race to finish the flow: the initiator on failure, and
//! the poll scheduler on success or failure. The first
//! [`fulfill`](CompletionGate::fulfill) wins; later calls are no-ops that
//! return immediately, whether or not the waiter is still around.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use nclogin_core::Credentials;
use tokio::sync::oneshot;
use tracing::debug;

use crate::error::AuthError;

/// The terminal result of a login flow.
pub type AuthResult = Result<Credentials, AuthError>;

/// Producer side of the gate, shared by every task that may finish the flow.
#[derive(Debug)]
pub struct CompletionGate {
    fulfilled: AtomicBool,
    sender: Mutex<Option<oneshot::Sender<AuthResult>>>,
}

/// Consumer side of the gate.
#[derive(Debug)]
pub struct GateWaiter {
    receiver: oneshot::Receiver<AuthResult>,
}

impl CompletionGate {
    /// Creates a gate and its waiter.
    pub fn new() -> (Self, GateWaiter) {
        let (sender, receiver) = oneshot::channel();
        let gate = Self {
            fulfilled: AtomicBool::new(false),
            sender: Mutex::new(Some(sender)),
        };
        (gate, GateWaiter { receiver })
    }

    /// Delivers `result` if no result has been delivered yet.
    ///
    /// Returns true if this call won. Never blocks.
    pub fn fulfill(&self, result: AuthResult) -> bool {
        if self.fulfilled.swap(true, Ordering::AcqRel) {
            debug!("Completion gate already fulfilled, dropping result");
            return false;
        }

        let sender = match self.sender.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        if let Some(sender) = sender {
            if sender.send(result).is_err() {
                debug!("Completion gate waiter already gone");
            }
        }
        true
    }

    /// Returns true once a result has been delivered.
    pub fn is_fulfilled(&self) -> bool {
        self.fulfilled.load(Ordering::Acquire)
    }
}

impl GateWaiter {
    /// Waits for the terminal result.
    ///
    /// Resolves to [`AuthError::Abandoned`] if the gate is dropped without
    /// ever being fulfilled.
    pub async fn wait(self) -> AuthResult {
        self.receiver.await.unwrap_or(Err(AuthError::Abandoned))
    }
}

// ============================================================================
// Tests
// ============================================================================
