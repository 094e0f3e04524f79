//! In-memory [`LoginApi`] for driving the flow in tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use nclogin_core::{Credentials, LoginSession};
use tokio::time::Instant;
use url::Url;

use crate::api::{LoginApi, PollStatus};
use crate::error::AuthError;

pub(crate) fn sample_session() -> LoginSession {
    LoginSession::new(
        "poll-token",
        Url::parse("https://cloud.example/login/v2/poll").unwrap(),
        Url::parse("https://cloud.example/login/v2/flow/abc").unwrap(),
    )
}

pub(crate) fn sample_credentials() -> Credentials {
    Credentials {
        server: "https://cloud.example".to_string(),
        login_name: "alice".to_string(),
        app_password: "secret".to_string(),
    }
}

/// Scripted login API. Polls beyond the script answer `Pending`.
#[derive(Default)]
pub(crate) struct FakeApi {
    start_result: Mutex<Option<Result<LoginSession, AuthError>>>,
    start_calls: Mutex<Vec<(Url, String)>>,
    poll_script: Mutex<VecDeque<Result<PollStatus, AuthError>>>,
    poll_times: Mutex<Vec<Instant>>,
    poll_delay: Option<Duration>,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_start_error(self, error: AuthError) -> Self {
        *self.start_result.lock().unwrap() = Some(Err(error));
        self
    }

    pub(crate) fn with_polls(
        self,
        script: impl IntoIterator<Item = Result<PollStatus, AuthError>>,
    ) -> Self {
        self.poll_script.lock().unwrap().extend(script);
        self
    }

    pub(crate) fn with_poll_delay(mut self, delay: Duration) -> Self {
        self.poll_delay = Some(delay);
        self
    }

    pub(crate) fn polls(&self) -> usize {
        self.poll_times.lock().unwrap().len()
    }

    pub(crate) fn poll_times(&self) -> Vec<Instant> {
        self.poll_times.lock().unwrap().clone()
    }

    pub(crate) fn start_calls(&self) -> Vec<(Url, String)> {
        self.start_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LoginApi for FakeApi {
    async fn start_login(
        &self,
        endpoint: &Url,
        user_agent: &str,
    ) -> Result<LoginSession, AuthError> {
        self.start_calls
            .lock()
            .unwrap()
            .push((endpoint.clone(), user_agent.to_string()));
        self.start_result
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(sample_session()))
    }

    async fn poll(&self, _session: &LoginSession) -> Result<PollStatus, AuthError> {
        self.poll_times.lock().unwrap().push(Instant::now());
        if let Some(delay) = self.poll_delay {
            tokio::time::sleep(delay).await;
        }
        self.poll_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(PollStatus::Pending))
    }
}
