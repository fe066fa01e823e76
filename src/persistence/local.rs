//! Browser LocalStorage backend (wasm32)

use super::{Storage, StorageError};

#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StorageError::Unavailable("LocalStorage not available".to_string()))
    }
}

impl Storage for LocalStorage {
    fn get_value(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("get {key}: {e:?}")))
    }

    fn set_value(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Unavailable(format!("set {key}: {e:?}")))
    }
}
