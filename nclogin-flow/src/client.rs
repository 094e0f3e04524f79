//! HTTP implementation of the login API.
//!
//! The client is owned by the flow and passed in explicitly; nothing here
//! touches process-wide HTTP state.

use std::time::Duration;

use async_trait::async_trait;
use nclogin_core::{Credentials, LoginSession};
use reqwest::{Client, Response, StatusCode, header};
use tracing::{debug, instrument};
use url::Url;

use crate::api::{LoginApi, PollStatus};
use crate::error::{AuthError, Stage};
use crate::settings::FlowSettings;

/// User agent for requests that do not carry the caller's client identifier.
const USER_AGENT: &str = concat!("nclogin/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// HTTP Login API
// ============================================================================

/// Login API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpLoginApi {
    inner: Client,
}

impl HttpLoginApi {
    /// Creates a new client with default settings.
    pub fn new() -> Result<Self, AuthError> {
        Self::from_settings(&FlowSettings::default())
    }

    /// Creates a client using the request timeout from `settings`.
    pub fn from_settings(settings: &FlowSettings) -> Result<Self, AuthError> {
        Self::with_timeout(settings.request_timeout)
    }

    /// Creates a new client with a custom per-request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, AuthError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(AuthError::Client)?;

        Ok(Self { inner: client })
    }

    /// Wraps an existing reqwest client.
    pub fn from_client(client: Client) -> Self {
        Self { inner: client }
    }

    /// Returns the inner reqwest client.
    pub fn inner(&self) -> &Client {
        &self.inner
    }
}

/// Reads the whole body of a response.
async fn read_body(response: Response, stage: Stage) -> Result<String, AuthError> {
    response
        .text()
        .await
        .map_err(|source| AuthError::BodyRead { stage, source })
}

#[async_trait]
impl LoginApi for HttpLoginApi {
    #[instrument(skip(self), fields(endpoint = %endpoint))]
    async fn start_login(
        &self,
        endpoint: &Url,
        user_agent: &str,
    ) -> Result<LoginSession, AuthError> {
        debug!("POST login initiation");

        let response = self
            .inner
            .post(endpoint.clone())
            .header(header::USER_AGENT, user_agent)
            .body("")
            .send()
            .await
            .map_err(|source| AuthError::Network {
                stage: Stage::Initiate,
                source,
            })?;

        let status = response.status();
        debug!(status = %status, "Response received");

        if status != StatusCode::OK {
            return Err(AuthError::HttpStatus {
                stage: Stage::Initiate,
                status: status.as_u16(),
            });
        }

        let body = read_body(response, Stage::Initiate).await?;
        Ok(LoginSession::from_json(&body)?)
    }

    #[instrument(skip(self, session), fields(endpoint = %session.poll_endpoint()))]
    async fn poll(&self, session: &LoginSession) -> Result<PollStatus, AuthError> {
        debug!("POST poll");

        let response = self
            .inner
            .post(session.poll_endpoint().clone())
            .form(&[("token", session.poll_token())])
            .send()
            .await
            .map_err(|source| AuthError::Network {
                stage: Stage::Poll,
                source,
            })?;

        let status = response.status();
        debug!(status = %status, "Response received");

        match status {
            StatusCode::OK => {
                let body = read_body(response, Stage::Poll).await?;
                Ok(PollStatus::Complete(Credentials::from_json(&body)?))
            }
            StatusCode::NOT_FOUND => Ok(PollStatus::Pending),
            other => Err(AuthError::HttpStatus {
                stage: Stage::Poll,
                status: other.as_u16(),
            }),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
