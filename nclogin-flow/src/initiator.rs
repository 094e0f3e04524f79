//! Login session initiation.

use std::sync::Arc;

use nclogin_core::{LoginSession, ServerAddress};
use tracing::{info, instrument, warn};
use url::Url;

use crate::api::LoginApi;
use crate::error::AuthError;
use crate::settings::FlowSettings;

/// Performs the one-shot handshake that starts a login.
pub struct SessionInitiator<A: ?Sized> {
    api: Arc<A>,
    default_scheme: String,
}

impl<A: LoginApi + ?Sized> SessionInitiator<A> {
    /// Creates an initiator using `api` for the request.
    pub fn new(api: Arc<A>, settings: &FlowSettings) -> Self {
        Self {
            api,
            default_scheme: settings.default_scheme.clone(),
        }
    }

    /// Resolves the login initiation endpoint for a user-supplied address.
    pub fn login_endpoint(&self, server: &str) -> Result<Url, AuthError> {
        let address = ServerAddress::parse(server, &self.default_scheme)?;

        if address.scheme_defaulted() {
            warn!(
                scheme = %self.default_scheme,
                "Server address has no scheme, assuming the default"
            );
        }
        if address.is_insecure() {
            warn!("Logging in over plain HTTP; credentials are sent unencrypted");
        }

        Ok(address.login_endpoint())
    }

    /// Starts a login on `server`, identifying the client as `client_id`.
    #[instrument(skip(self))]
    pub async fn initiate(&self, server: &str, client_id: &str) -> Result<LoginSession, AuthError> {
        let endpoint = self.login_endpoint(server)?;
        let session = self.api.start_login(&endpoint, client_id).await?;

        info!(poll_endpoint = %session.poll_endpoint(), "Login session started");
        Ok(session)
    }
}

// ============================================================================
// Tests
// ============================================================================
