//! Session store
//!
//! Owns the persisted credentials and publishes every change of the signed-in
//! user on a `watch` channel. The refresh timer task holds only a weak
//! reference, so dropping the last store handle stops it.

use super::{RefreshScheduler, SessionError};
use async_trait::async_trait;
use chrono::Utc;
use clinic_core::{CredentialVault, Credentials, KeyValueStore, Role, TokenClaims, UserInfo};
use clinic_http::client::CredentialProvider;
use clinic_http::types::{ApiResponse, LoginRequest, RefreshedTokens, RegisterRequest};
use clinic_http::{ClientError, ClinicClient};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

struct SessionInner {
    client: ClinicClient,
    vault: CredentialVault,
    sender: watch::Sender<Option<UserInfo>>,
    scheduler: RefreshScheduler,
    refresh_lead: Duration,
}

/// Shared handle to the current session
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionInner>,
}

impl SessionStore {
    /// Create a store over `storage`, seeded with whatever session it holds
    ///
    /// Call [`SessionStore::restore`] afterwards to validate the stored token
    /// and arm the refresh timer.
    pub fn new(client: ClinicClient, storage: Arc<dyn KeyValueStore>, refresh_lead: Duration) -> Self {
        let vault = CredentialVault::new(storage);
        let initial = vault.access_token().and_then(|_| vault.user_info());
        let (sender, _) = watch::channel(initial);

        Self {
            inner: Arc::new(SessionInner {
                client,
                vault,
                sender,
                scheduler: RefreshScheduler::new(),
                refresh_lead,
            }),
        }
    }

    /// Resume a persisted session
    ///
    /// A stored token that cannot be decoded ends the session, as does a
    /// token stored without a readable user record.
    pub fn restore(&self) {
        let Some(token) = self.inner.vault.access_token() else {
            return;
        };
        if self.current_user().is_none() {
            warn!("Stored user record is missing or unreadable, signing out");
            self.logout();
            return;
        }

        match TokenClaims::decode(&token) {
            Ok(claims) => {
                debug!(user = ?self.current_user().map(|u| u.user_id), "Restored session");
                self.arm_refresh(&claims);
            }
            Err(e) => {
                warn!(error = %e, "Stored access token is unusable, signing out");
                self.logout();
            }
        }
    }

    /// The signed-in user, if any
    pub fn current_user(&self) -> Option<UserInfo> {
        self.inner.sender.borrow().clone()
    }

    /// Receive every subsequent session change
    pub fn subscribe(&self) -> watch::Receiver<Option<UserInfo>> {
        self.inner.sender.subscribe()
    }

    pub fn access_token(&self) -> Option<String> {
        self.inner.vault.access_token()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.sender.borrow().is_some()
    }

    /// Role check against the persisted snapshot
    pub fn has_role(&self, role: Role) -> bool {
        self.inner
            .sender
            .borrow()
            .as_ref()
            .is_some_and(|user| user.has_role(role))
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.inner
            .sender
            .borrow()
            .as_ref()
            .is_some_and(|user| user.has_any_role(roles))
    }

    /// Typed access to the persisted keys
    pub fn vault(&self) -> &CredentialVault {
        &self.inner.vault
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<UserInfo, SessionError> {
        let response = self.inner.client.login(request).await?;
        let user = self.establish(response)?;
        info!(user_id = %user.user_id, "Signed in");
        Ok(user)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<UserInfo, SessionError> {
        let response = self.inner.client.register(request).await?;
        let user = self.establish(response)?;
        info!(user_id = %user.user_id, "Registered and signed in");
        Ok(user)
    }

    /// End the session regardless of its current state
    pub fn logout(&self) {
        self.inner.scheduler.cancel();
        self.inner.vault.clear();
        self.inner.sender.send_replace(None);
        debug!("Session cleared");
    }

    /// Exchange the stored refresh token for a new access token
    ///
    /// Persists the new tokens, updates the user snapshot when the backend
    /// echoes it, and rearms the timer. Failure leaves the session untouched;
    /// callers decide whether to end it.
    pub async fn refresh_session(&self) -> Result<String, SessionError> {
        let refresh_token = self
            .inner
            .vault
            .refresh_token()
            .ok_or(SessionError::NoRefreshToken)?;

        let response = self.inner.client.refresh_token(&refresh_token).await?;
        let tokens = Self::payload(response)?;
        let claims = TokenClaims::decode(&tokens.access_token)?;

        self.inner
            .vault
            .save_tokens(&tokens.access_token, tokens.refresh_token.as_deref())?;

        if let Some(user) = Self::echoed_user(&tokens) {
            self.inner.vault.save_user_info(&user)?;
            self.inner.sender.send_replace(Some(user));
        }

        debug!("Access token refreshed");
        self.arm_refresh(&claims);
        Ok(tokens.access_token)
    }

    /// Schedule a refresh ahead of the token's expiry
    ///
    /// Nothing is armed when that moment has already passed, and any pending
    /// timer is cancelled.
    pub fn arm_refresh(&self, claims: &TokenClaims) {
        let delay = match claims.refresh_delay(Utc::now(), self.inner.refresh_lead) {
            Ok(Some(delay)) => delay,
            Ok(None) => {
                self.inner.scheduler.cancel();
                return;
            }
            Err(e) => {
                warn!(error = %e, "Cannot schedule token refresh, signing out");
                self.logout();
                return;
            }
        };

        let weak: Weak<SessionInner> = Arc::downgrade(&self.inner);
        self.inner.scheduler.arm(delay, async move {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let session = SessionStore { inner };
            if let Err(e) = session.refresh_session().await {
                warn!(error = %e, "Scheduled token refresh failed, signing out");
                session.logout();
            }
        });
    }

    /// Whether a refresh timer is pending
    pub fn refresh_pending(&self) -> bool {
        self.inner.scheduler.is_armed()
    }

    fn establish(&self, response: ApiResponse<Credentials>) -> Result<UserInfo, SessionError> {
        let credentials = Self::payload(response)?;
        let claims = TokenClaims::decode(&credentials.access_token)?;

        let user = self.inner.vault.save(&credentials)?;
        self.inner.sender.send_replace(Some(user.clone()));
        self.arm_refresh(&claims);
        Ok(user)
    }

    fn payload<T>(response: ApiResponse<T>) -> Result<T, SessionError> {
        Ok(response.into_result()?)
    }

    fn echoed_user(tokens: &RefreshedTokens) -> Option<UserInfo> {
        match (&tokens.user_id, &tokens.email) {
            (Some(user_id), Some(email)) => Some(UserInfo {
                user_id: user_id.clone(),
                email: email.clone(),
                user_roles: tokens.user_roles.clone().unwrap_or_default(),
            }),
            _ => None,
        }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl CredentialProvider for SessionStore {
    fn access_token(&self) -> Option<String> {
        self.inner.vault.access_token()
    }

    async fn refresh(&self) -> Result<String, ClientError> {
        self.refresh_session().await.map_err(|e| match e {
            SessionError::Client(error) => error,
            other => ClientError::RefreshFailed(other.to_string()),
        })
    }

    fn end_session(&self) {
        self.logout();
    }
}
