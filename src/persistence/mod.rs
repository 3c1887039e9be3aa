//! Durable key-value storage
//!
//! Backends:
//! - `MemoryStore`: process-local, for tests and storage-less hosts
//! - `FileStore`: a JSON map on disk, replaced atomically (tmp -> rename)
//! - `LocalStore`: browser LocalStorage (wasm32 only)

use std::collections::BTreeMap;

use crate::error::StorageError;

pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use web::LocalStore;

/// String-keyed durable storage supplied by the host
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
