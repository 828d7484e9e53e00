//! Durable client storage
//!
//! The browser keeps session state in `localStorage`; natively the same
//! contract is served by [`MemoryStore`]. [`CredentialVault`] layers the
//! typed session keys on top of any [`KeyValueStore`].

use crate::error::CoreResult;
use crate::session::{Credentials, UserInfo};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, warn};

/// Storage keys used by the client
pub struct StorageKeys;

impl StorageKeys {
    pub const ACCESS_TOKEN: &'static str = "authToken";
    pub const REFRESH_TOKEN: &'static str = "refreshToken";
    pub const USER_INFO: &'static str = "userInfo";
    /// Appointment summary kept across the payment redirect
    pub const PENDING_APPOINTMENT: &'static str = "pendingAppointment";

    /// Keys that together make up a persisted session
    pub const SESSION: [&'static str; 3] = [Self::ACCESS_TOKEN, Self::REFRESH_TOKEN, Self::USER_INFO];
}

/// String key-value storage with `localStorage` semantics
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> CoreResult<()>;
    fn remove(&self, key: &str);
}

/// In-process storage backend
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

/// Typed access to the persisted session keys
#[derive(Clone)]
pub struct CredentialVault {
    store: Arc<dyn KeyValueStore>,
}

impl CredentialVault {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The underlying key-value store
    #[must_use]
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.store
            .get(StorageKeys::ACCESS_TOKEN)
            .filter(|token| !token.is_empty())
    }

    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.store
            .get(StorageKeys::REFRESH_TOKEN)
            .filter(|token| !token.is_empty())
    }

    /// Stored user snapshot; unparseable JSON reads as absent
    #[must_use]
    pub fn user_info(&self) -> Option<UserInfo> {
        self.read_json(StorageKeys::USER_INFO)
    }

    /// Persist a full set of credentials and return the user snapshot
    pub fn save(&self, credentials: &Credentials) -> CoreResult<UserInfo> {
        let user = credentials.user_info();
        self.save_tokens(&credentials.access_token, Some(&credentials.refresh_token))?;
        self.write_json(StorageKeys::USER_INFO, &user)?;
        debug!(user_id = %user.user_id, "Persisted session credentials");
        Ok(user)
    }

    /// Persist tokens only, keeping the stored refresh token when none is given
    pub fn save_tokens(&self, access_token: &str, refresh_token: Option<&str>) -> CoreResult<()> {
        self.store.set(StorageKeys::ACCESS_TOKEN, access_token)?;
        if let Some(refresh_token) = refresh_token {
            self.store.set(StorageKeys::REFRESH_TOKEN, refresh_token)?;
        }
        Ok(())
    }

    /// Replace the stored user snapshot
    pub fn save_user_info(&self, user: &UserInfo) -> CoreResult<()> {
        self.write_json(StorageKeys::USER_INFO, user)
    }

    /// Remove every session key
    pub fn clear(&self) {
        for key in StorageKeys::SESSION {
            self.store.remove(key);
        }
    }

    /// Serialize a value under `key`
    pub fn write_json<T: Serialize>(&self, key: &str, value: &T) -> CoreResult<()> {
        let serialized = serde_json::to_string(value)?;
        self.store.set(key, &serialized)
    }

    /// Read and parse a value stored under `key`
    #[must_use]
    pub fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.store.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "Ignoring malformed stored value");
                None
            }
        }
    }

    /// Read and parse a value stored under `key`, removing it once parsed
    ///
    /// A malformed value is left in place.
    pub fn take_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.read_json(key)?;
        self.store.remove(key);
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vault() -> (Arc<MemoryStore>, CredentialVault) {
        let store = Arc::new(MemoryStore::new());
        let vault = CredentialVault::new(store.clone());
        (store, vault)
    }

    fn credentials() -> Credentials {
        Credentials {
            access_token: "access-1".to_string(),
            refresh_token: "refresh-1".to_string(),
            user_id: "u-1".to_string(),
            email: "patient@example.com".to_string(),
            user_roles: vec!["PATIENT".to_string()],
        }
    }

    #[test]
    fn test_save_and_clear_session() {
        let (store, vault) = vault();

        let user = vault.save(&credentials()).unwrap();
        assert_eq!(user.user_id, "u-1");
        assert_eq!(vault.access_token().as_deref(), Some("access-1"));
        assert_eq!(vault.refresh_token().as_deref(), Some("refresh-1"));
        assert_eq!(vault.user_info(), Some(user));
        assert_eq!(store.len(), 3);

        vault.clear();
        assert!(store.is_empty());
        assert!(vault.access_token().is_none());
        assert!(vault.user_info().is_none());
    }

    #[test]
    fn test_malformed_user_info_reads_as_absent() {
        let (store, vault) = vault();
        store.set(StorageKeys::USER_INFO, "{not json").unwrap();
        assert!(vault.user_info().is_none());
    }

    #[test]
    fn test_save_tokens_keeps_refresh_token() {
        let (_, vault) = vault();
        vault.save(&credentials()).unwrap();

        vault.save_tokens("access-2", None).unwrap();
        assert_eq!(vault.access_token().as_deref(), Some("access-2"));
        assert_eq!(vault.refresh_token().as_deref(), Some("refresh-1"));

        vault.save_tokens("access-3", Some("refresh-3")).unwrap();
        assert_eq!(vault.refresh_token().as_deref(), Some("refresh-3"));
    }

    #[test]
    fn test_empty_token_is_absent() {
        let (store, vault) = vault();
        store.set(StorageKeys::ACCESS_TOKEN, "").unwrap();
        assert!(vault.access_token().is_none());
    }

    #[test]
    fn test_take_json_consumes_value() {
        let (store, vault) = vault();
        vault.write_json("pending", &vec![1, 2, 3]).unwrap();

        let taken: Option<Vec<i32>> = vault.take_json("pending");
        assert_eq!(taken, Some(vec![1, 2, 3]));
        assert!(store.get("pending").is_none());

        store.set("pending", "garbage").unwrap();
        let taken: Option<Vec<i32>> = vault.take_json("pending");
        assert!(taken.is_none());
        assert_eq!(store.get("pending").as_deref(), Some("garbage"));
    }
}
