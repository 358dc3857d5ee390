//! InMemoryKeyValueStore - HashMap-backed store for testing and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{KeyValueStore, StorageError};

/// In-memory key-value store backed by a HashMap.
///
/// Clone-friendly via Arc; every clone sees writes made through any other
/// handle, which is how tests simulate a reload.
#[derive(Clone, Default)]
pub struct InMemoryKeyValueStore {
    storage: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryKeyValueStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of written slots.
    pub fn len(&self) -> Result<usize, StorageError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StorageError::LockPoisoned("read"))?;
        Ok(storage.len())
    }

    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StorageError::LockPoisoned("read"))?;
        Ok(storage.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StorageError::LockPoisoned("write"))?;
        storage.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<bool, StorageError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StorageError::LockPoisoned("write"))?;
        Ok(storage.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get() {
        let store = InMemoryKeyValueStore::new();
        store.set_item("books", "{}").unwrap();

        assert_eq!(store.get_item("books").unwrap().as_deref(), Some("{}"));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn get_missing_returns_none() {
        let store = InMemoryKeyValueStore::new();
        assert!(store.get_item("missing").unwrap().is_none());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn set_replaces_previous_value() {
        let store = InMemoryKeyValueStore::new();
        store.set_item("books", "{}").unwrap();
        store.set_item("books", "{\"a\":1}").unwrap();

        assert_eq!(store.get_item("books").unwrap().as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn remove_existing_and_missing() {
        let store = InMemoryKeyValueStore::new();
        store.set_item("books", "{}").unwrap();

        assert!(store.remove_item("books").unwrap());
        assert!(!store.remove_item("books").unwrap());
        assert!(store.get_item("books").unwrap().is_none());
    }

    #[test]
    fn clone_shares_storage() {
        let store = InMemoryKeyValueStore::new();
        let clone = store.clone();

        store.set_item("movies", "{}").unwrap();
        assert_eq!(clone.get_item("movies").unwrap().as_deref(), Some("{}"));
    }
}
