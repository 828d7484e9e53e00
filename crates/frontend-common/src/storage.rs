//! Browser persistence for session keys

#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;

#[cfg(target_arch = "wasm32")]
mod local {
    use clinic_core::{CoreError, CoreResult, KeyValueStore};
    use gloo::storage::{LocalStorage, Storage};
    use tracing::warn;

    /// [`KeyValueStore`] over `window.localStorage`
    ///
    /// Values are stored verbatim, not JSON-encoded, so tokens stay readable
    /// by other scripts on the page.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct LocalStore;

    impl KeyValueStore for LocalStore {
        fn get(&self, key: &str) -> Option<String> {
            LocalStorage::raw().get_item(key).ok().flatten()
        }

        fn set(&self, key: &str, value: &str) -> CoreResult<()> {
            LocalStorage::raw()
                .set_item(key, value)
                .map_err(|e| CoreError::storage(format!("failed to write {key}: {e:?}")))
        }

        fn remove(&self, key: &str) {
            if let Err(e) = LocalStorage::raw().remove_item(key) {
                warn!(key, error = ?e, "Failed to remove stored value");
            }
        }
    }
}
