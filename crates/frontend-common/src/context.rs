//! Application wiring
//!
//! One [`AppContext`] is built at startup and handed to whatever needs the
//! session, the gate or the booking flow.

use crate::layout::{AssetHost, LayoutAssetManager};
use crate::services::BookingService;
use crate::session::SessionStore;
use clinic_core::{ClinicSettings, KeyValueStore};
use clinic_http::{AuthGate, ClientError, ClinicClient};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppContext {
    settings: Arc<ClinicSettings>,
    session: SessionStore,
    gate: AuthGate,
    booking: BookingService,
}

impl AppContext {
    /// Wire up the client stack and resume any stored session
    ///
    /// Must be called from within the async runtime, since restoring a
    /// session arms the refresh timer.
    pub fn new(settings: ClinicSettings, storage: Arc<dyn KeyValueStore>) -> Result<Self, ClientError> {
        let client = ClinicClient::from_settings(&settings.api)?;
        let session = SessionStore::new(client.clone(), storage, settings.session.refresh_lead());
        let gate = AuthGate::new(client, Arc::new(session.clone()));
        let booking = BookingService::new(gate.clone(), session.clone());

        session.restore();
        info!(
            base_url = %settings.api.base_url,
            authenticated = session.is_authenticated(),
            "Application context ready"
        );

        Ok(Self {
            settings: Arc::new(settings),
            session,
            gate,
            booking,
        })
    }

    /// Context backed by `localStorage`
    #[cfg(target_arch = "wasm32")]
    pub fn in_browser(settings: ClinicSettings) -> Result<Self, ClientError> {
        Self::new(settings, Arc::new(crate::storage::LocalStore))
    }

    pub fn settings(&self) -> &ClinicSettings {
        &self.settings
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Authenticated access to the backend
    pub fn api(&self) -> &AuthGate {
        &self.gate
    }

    pub fn booking(&self) -> &BookingService {
        &self.booking
    }

    /// Layout manager over `host` using the configured delays
    pub fn layout_manager<H: AssetHost>(&self, host: H) -> LayoutAssetManager<H> {
        LayoutAssetManager::new(
            host,
            self.settings.layout.init_delay(),
            self.settings.layout.readiness_poll(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_core::{MemoryStore, StorageKeys};

    #[tokio::test]
    async fn test_stale_storage_is_cleared_on_startup() {
        let storage = Arc::new(MemoryStore::new());
        storage.set(StorageKeys::ACCESS_TOKEN, "garbage").unwrap();
        storage.set(StorageKeys::REFRESH_TOKEN, "refresh-1").unwrap();

        let context = AppContext::new(ClinicSettings::default(), storage.clone()).unwrap();

        assert!(!context.session().is_authenticated());
        assert!(storage.is_empty());
        assert_eq!(context.api().client().base_url(), "http://localhost:8080/api");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let mut settings = ClinicSettings::default();
        settings.api.base_url = "localhost without scheme".to_string();

        let result = AppContext::new(settings, Arc::new(MemoryStore::new()));
        assert!(matches!(result, Err(ClientError::Configuration(_))));
    }
}
