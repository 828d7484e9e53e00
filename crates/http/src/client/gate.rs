//! Auth gate wrapped around every backend call
//!
//! Attaches `Authorization: Bearer <token>` to everything except login and
//! registration. A 401 on any request other than the refresh itself triggers
//! one refresh; on success the original request is replayed once with the
//! new token. On refresh failure the session is ended and the original error
//! is returned.
//!
//! Concurrent requests that hit a 401 at the same moment each run their own
//! refresh. Nothing de-duplicates them.

use super::{ApiRequest, ClientError, ClinicClient};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

/// Source of bearer credentials for the gate
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait CredentialProvider: Send + Sync {
    /// Current access token, if a session exists
    fn access_token(&self) -> Option<String>;

    /// Obtain and persist a new access token, returning it
    async fn refresh(&self) -> Result<String, ClientError>;

    /// Clear stored credentials and notify session observers
    fn end_session(&self);
}

/// Client wrapper that authenticates requests and recovers from expired tokens
#[derive(Clone)]
pub struct AuthGate {
    client: ClinicClient,
    credentials: Arc<dyn CredentialProvider>,
}

impl AuthGate {
    pub fn new(client: ClinicClient, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// The unauthenticated client underneath
    pub fn client(&self) -> &ClinicClient {
        &self.client
    }

    /// Send a request through the gate
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        if request.is_credential_exchange() {
            return self.client.execute(&request, None).await;
        }

        let token = self.credentials.access_token();
        match self.client.execute(&request, token.as_deref()).await {
            Err(error) if error.is_auth_expired() && !request.is_token_refresh() => {
                debug!(path = request.path(), "Access token rejected, refreshing");

                match self.credentials.refresh().await {
                    Ok(new_token) => self.client.execute(&request, Some(&new_token)).await,
                    Err(refresh_error) => {
                        warn!(
                            path = request.path(),
                            error = %refresh_error,
                            "Token refresh failed, ending session"
                        );
                        self.credentials.end_session();
                        Err(error)
                    }
                }
            }
            result => result,
        }
    }
}
