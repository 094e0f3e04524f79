//! Login flow orchestration.
//!
//! ## Flow
//!
//! 1. **Initiate**: POST `{server}/index.php/login/v2` for a poll token,
//!    poll endpoint and login URL
//! 2. **Display**: show the login URL on the output sink
//! 3. **Poll**: run the [`PollScheduler`] and the [`TriggerSource`]
//!    concurrently until one terminal result reaches the [`CompletionGate`]
//! 4. **Finish**: cancel the invocation scope and return the result
//!
//! ## Example
//!
//! ```ignore
//! let cancel = CancellationToken::new();
//! let creds = nclogin_flow::authenticate(
//!     &cancel,
//!     "cloud.example.com",
//!     "Example_Client/1.0",
//!     std::io::stdout(),
//!     std::io::stdin(),
//! )
//! .await?;
//! println!("{} @ {}", creds.login_name, creds.server);
//! ```

use std::io::{BufReader, Read, Write};
use std::sync::Arc;

use nclogin_core::Credentials;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api::LoginApi;
use crate::client::HttpLoginApi;
use crate::error::AuthError;
use crate::gate::CompletionGate;
use crate::initiator::SessionInitiator;
use crate::prompt::Prompter;
use crate::scheduler::PollScheduler;
use crate::settings::FlowSettings;
use crate::trigger::TriggerSource;

// ============================================================================
// Login Flow
// ============================================================================

/// A configured login flow.
pub struct LoginFlow<A: ?Sized = HttpLoginApi> {
    api: Arc<A>,
    settings: FlowSettings,
}

impl LoginFlow<HttpLoginApi> {
    /// Creates a flow that talks HTTP with its own client.
    ///
    /// Fails with [`AuthError::InvalidSettings`] if a duration is zero.
    pub fn new(settings: FlowSettings) -> Result<Self, AuthError> {
        settings.validate()?;
        let api = HttpLoginApi::from_settings(&settings)?;
        Ok(Self::with_api(Arc::new(api), settings))
    }
}

impl<A: LoginApi + ?Sized + 'static> LoginFlow<A> {
    /// Creates a flow over a custom API implementation.
    pub fn with_api(api: Arc<A>, settings: FlowSettings) -> Self {
        Self { api, settings }
    }

    /// The flow settings.
    pub fn settings(&self) -> &FlowSettings {
        &self.settings
    }

    /// Runs one login from start to finish.
    ///
    /// Prompts go to `output`; every line read from `input` requests an
    /// immediate poll. Completes when the user has logged in, on the first
    /// fatal error, or with [`AuthError::Cancelled`] once `cancel` fires.
    ///
    /// The input is read on a separate thread that cannot be interrupted
    /// mid-read: after this returns, that thread lingers until its current
    /// read completes, then exits without acting on the line.
    pub async fn authenticate<W, R>(
        &self,
        cancel: &CancellationToken,
        server: &str,
        client_id: &str,
        output: W,
        input: R,
    ) -> Result<Credentials, AuthError>
    where
        W: Write + Send + 'static,
        R: Read + Send + 'static,
    {
        let scope = cancel.child_token();
        let _scope_guard = scope.clone().drop_guard();

        let (gate, waiter) = CompletionGate::new();
        let gate = Arc::new(gate);
        let prompter = Arc::new(Prompter::new(output));

        prompter.initiating();
        let initiator = SessionInitiator::new(Arc::clone(&self.api), &self.settings);
        let initiated = tokio::select! {
            biased;
            () = scope.cancelled() => Err(AuthError::Cancelled),
            result = initiator.initiate(server, client_id) => result,
        };

        let mut scheduler = None;
        match initiated {
            Err(e) => {
                warn!(error = %e, "Login initiation failed");
                gate.fulfill(Err(e));
            }
            Ok(session) => {
                prompter.login_link(session.login_url());

                let (trigger_tx, trigger_rx) = mpsc::channel(1);
                let poller = PollScheduler::new(
                    Arc::clone(&self.api),
                    Arc::new(session),
                    trigger_rx,
                    Arc::clone(&gate),
                    scope.clone(),
                    &self.settings,
                )
                .with_prompter(Arc::clone(&prompter));
                scheduler = Some(tokio::spawn(poller.run()));

                let source = TriggerSource::new(BufReader::new(input), trigger_tx, scope.clone());
                if let Err(e) = source.spawn() {
                    warn!(error = %e, "Could not start input listener, polling on timer only");
                }
            }
        }

        let result = tokio::select! {
            biased;
            result = waiter.wait() => result,
            () = cancel.cancelled() => Err(AuthError::Cancelled),
        };
        scope.cancel();

        if let Some(handle) = scheduler {
            match handle.await {
                Ok(exit) => debug!(?exit, "Poll scheduler stopped"),
                Err(e) => warn!(error = %e, "Poll scheduler task failed"),
            }
        }

        if result.is_ok() {
            info!("Login flow finished");
        }
        result
    }
}

impl<A: ?Sized> std::fmt::Debug for LoginFlow<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginFlow")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Runs a login with default settings over HTTP.
///
/// See [`LoginFlow::authenticate`].
pub async fn authenticate<W, R>(
    cancel: &CancellationToken,
    server: &str,
    client_id: &str,
    output: W,
    input: R,
) -> Result<Credentials, AuthError>
where
    W: Write + Send + 'static,
    R: Read + Send + 'static,
{
    LoginFlow::new(FlowSettings::default())?
        .authenticate(cancel, server, client_id, output, input)
        .await
}

// ============================================================================
// Tests
// ============================================================================
