//! Adaptive poll scheduler.
//!
//! The scheduler waits for whichever comes first: a "poll now" trigger, the
//! current interval elapsing, or cancellation. Waking by timer grows the
//! interval; waking by trigger does not. Either kind of wake-up only
//! results in a request when at least `min_poll_spacing` has passed since
//! the previous poll finished, which debounces bursts of triggers.
//!
//! The first terminal outcome (credentials or a fatal error) goes into the
//! [`CompletionGate`] and the scheduler stops; it never polls again.

use std::sync::Arc;
use std::time::Duration;

use nclogin_core::{LoginSession, PollInterval};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api::{LoginApi, PollStatus};
use crate::gate::CompletionGate;
use crate::prompt::Prompter;
use crate::settings::FlowSettings;

/// Why the scheduler stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerExit {
    /// A terminal result was delivered to the gate.
    Completed,
    /// The cancellation scope fired first.
    Cancelled,
}

/// What woke the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wake {
    Trigger,
    Timer,
}

/// Timing state, owned by the running scheduler alone.
#[derive(Debug)]
struct PollState {
    last_poll_end: Option<Instant>,
    interval: PollInterval,
}

impl PollState {
    fn cooled_down(&self, spacing: Duration) -> bool {
        self.last_poll_end
            .is_none_or(|end| end.elapsed() >= spacing)
    }
}

/// Polls the login endpoint until the flow finishes or is cancelled.
pub struct PollScheduler<A: ?Sized> {
    api: Arc<A>,
    session: Arc<LoginSession>,
    triggers: mpsc::Receiver<()>,
    gate: Arc<CompletionGate>,
    cancel: CancellationToken,
    prompter: Option<Arc<Prompter>>,
    initial_interval: Duration,
    min_poll_spacing: Duration,
}

impl<A: LoginApi + ?Sized> PollScheduler<A> {
    /// Creates a scheduler for `session`.
    pub fn new(
        api: Arc<A>,
        session: Arc<LoginSession>,
        triggers: mpsc::Receiver<()>,
        gate: Arc<CompletionGate>,
        cancel: CancellationToken,
        settings: &FlowSettings,
    ) -> Self {
        Self {
            api,
            session,
            triggers,
            gate,
            cancel,
            prompter: None,
            initial_interval: settings.initial_interval,
            min_poll_spacing: settings.min_poll_spacing,
        }
    }

    /// Announces each poll on `prompter`.
    #[must_use]
    pub fn with_prompter(mut self, prompter: Arc<Prompter>) -> Self {
        self.prompter = Some(prompter);
        self
    }

    /// Runs the poll loop.
    pub async fn run(mut self) -> SchedulerExit {
        let mut state = PollState {
            last_poll_end: None,
            interval: PollInterval::new(self.initial_interval),
        };
        let mut triggers_open = true;

        loop {
            let wake = tokio::select! {
                biased;
                () = self.cancel.cancelled() => {
                    debug!("Poll scheduler cancelled");
                    return SchedulerExit::Cancelled;
                }
                message = self.triggers.recv(), if triggers_open => match message {
                    Some(()) => Wake::Trigger,
                    None => {
                        debug!("Trigger source closed, polling on timer only");
                        triggers_open = false;
                        continue;
                    }
                },
                () = tokio::time::sleep(state.interval.current()) => {
                    state.interval.advance();
                    Wake::Timer
                }
            };

            if !state.cooled_down(self.min_poll_spacing) {
                debug!(?wake, "Last poll too recent, skipping");
                continue;
            }

            debug!(?wake, next_interval_secs = state.interval.current_secs(), "Polling");
            if let Some(exit) = self.poll_once(&mut state).await {
                return exit;
            }
        }
    }

    /// Issues one poll. Returns the exit reason if the scheduler must stop.
    async fn poll_once(&self, state: &mut PollState) -> Option<SchedulerExit> {
        if let Some(prompter) = &self.prompter {
            prompter.polling();
        }

        let result = tokio::select! {
            biased;
            () = self.cancel.cancelled() => return Some(SchedulerExit::Cancelled),
            result = self.api.poll(&self.session) => result,
        };
        state.last_poll_end = Some(Instant::now());

        match result {
            Ok(PollStatus::Pending) => {
                debug!("Login still pending");
                None
            }
            Ok(PollStatus::Complete(credentials)) => {
                info!(login_name = %credentials.login_name, "Login completed");
                self.gate.fulfill(Ok(credentials));
                Some(SchedulerExit::Completed)
            }
            Err(e) => {
                warn!(error = %e, "Polling failed");
                self.gate.fulfill(Err(e));
                Some(SchedulerExit::Completed)
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
