//! Key-value persistence
//!
//! The game stores a handful of small strings (best score, settings JSON).
//! Backends:
//! - `MemoryStorage`: in-process map, for tests and headless runs
//! - `FileStorage`: one JSON object on disk (native)
//! - `LocalStorage`: browser LocalStorage (wasm32)

use std::collections::BTreeMap;
use std::fmt;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

/// Why a storage call failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Backend could not be reached (no LocalStorage, I/O error)
    Unavailable(String),
    /// Backend reachable but its contents could not be decoded
    Corrupt(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable(msg) => write!(f, "storage unavailable: {msg}"),
            StorageError::Corrupt(msg) => write!(f, "storage corrupt: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// String key-value store
pub trait Storage {
    fn get_value(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_value(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_value(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set_value(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A backend that always fails, for exercising fallback paths
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStorage;

impl Storage for UnavailableStorage {
    fn get_value(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }

    fn set_value(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_round_trip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get_value("highScore"), Ok(None));
        storage.set_value("highScore", "120").unwrap();
        storage.set_value("highScore", "150").unwrap();
        assert_eq!(storage.get_value("highScore"), Ok(Some("150".to_string())));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_error_display() {
        let err = StorageError::Unavailable("no window".to_string());
        assert_eq!(err.to_string(), "storage unavailable: no window");
        assert!(UnavailableStorage.get_value("x").is_err());
    }
}
