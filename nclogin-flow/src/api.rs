//! Login API trait and poll status.
//!
//! The flow talks to the server through [`LoginApi`], so the scheduling
//! logic can be driven by an in-memory implementation in tests while
//! [`HttpLoginApi`](crate::client::HttpLoginApi) does the real requests.

use async_trait::async_trait;
use nclogin_core::{Credentials, LoginSession};
use url::Url;

use crate::error::AuthError;

/// Outcome of a single poll request that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollStatus {
    /// The user has not finished logging in yet (HTTP 404).
    Pending,
    /// The user logged in; here are the credentials.
    Complete(Credentials),
}

/// The two requests of the login flow.
#[async_trait]
pub trait LoginApi: Send + Sync {
    /// Starts a login at `endpoint`, identifying the client as `user_agent`.
    async fn start_login(&self, endpoint: &Url, user_agent: &str)
        -> Result<LoginSession, AuthError>;

    /// Polls once for completion of `session`.
    ///
    /// "Still pending" is [`PollStatus::Pending`], not an error.
    async fn poll(&self, session: &LoginSession) -> Result<PollStatus, AuthError>;
}
