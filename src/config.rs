//! Store configuration.
//!
//! Selects the backing store from a small JSON document:
//!
//! ```json
//! { "backend": "directory", "path": "./data" }
//! ```
//!
//! `{"backend": "memory"}` (the default) keeps everything in process.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::storage::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore, StorageError};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StoreConfig {
    /// Volatile in-process store.
    #[default]
    Memory,
    /// One JSON file per collection under `path`.
    Directory { path: PathBuf },
}

impl StoreConfig {
    pub fn from_json_str(json: &str) -> Result<Self, StorageError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Open the configured store.
    pub fn open(&self) -> Result<AnyStore, StorageError> {
        let store = match self {
            StoreConfig::Memory => AnyStore::Memory(InMemoryKeyValueStore::new()),
            StoreConfig::Directory { path } => AnyStore::File(FileKeyValueStore::open(path)?),
        };
        info!(backend = store.backend(), "store opened");
        Ok(store)
    }
}

/// Either store backend, chosen at runtime.
#[derive(Clone)]
pub enum AnyStore {
    Memory(InMemoryKeyValueStore),
    File(FileKeyValueStore),
}

impl AnyStore {
    pub fn backend(&self) -> &'static str {
        match self {
            AnyStore::Memory(_) => "memory",
            AnyStore::File(_) => "directory",
        }
    }
}

impl KeyValueStore for AnyStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            AnyStore::Memory(store) => store.get_item(key),
            AnyStore::File(store) => store.get_item(key),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            AnyStore::Memory(store) => store.set_item(key, value),
            AnyStore::File(store) => store.set_item(key, value),
        }
    }

    fn remove_item(&self, key: &str) -> Result<bool, StorageError> {
        match self {
            AnyStore::Memory(store) => store.remove_item(key),
            AnyStore::File(store) => store.remove_item(key),
        }
    }
}

impl From<InMemoryKeyValueStore> for AnyStore {
    fn from(store: InMemoryKeyValueStore) -> Self {
        AnyStore::Memory(store)
    }
}

impl From<FileKeyValueStore> for AnyStore {
    fn from(store: FileKeyValueStore) -> Self {
        AnyStore::File(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_memory() {
        assert_eq!(StoreConfig::default(), StoreConfig::Memory);
        assert_eq!(StoreConfig::default().open().unwrap().backend(), "memory");
    }

    #[test]
    fn parses_directory_backend() {
        let config = StoreConfig::from_json_str(r#"{"backend": "directory", "path": "./data"}"#)
            .unwrap();
        assert_eq!(
            config,
            StoreConfig::Directory {
                path: PathBuf::from("./data")
            }
        );
    }

    #[test]
    fn rejects_unknown_backend() {
        let err = StoreConfig::from_json_str(r#"{"backend": "cloud"}"#).unwrap_err();
        assert!(matches!(err, StorageError::Serde(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = StoreConfig::from_json_file(dir.path().join("store.json")).unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
    }

    #[test]
    fn directory_config_opens_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("store.json");
        let data_dir = dir.path().join("data");
        fs::write(
            &config_path,
            serde_json::to_string(&StoreConfig::Directory {
                path: data_dir.clone(),
            })
            .unwrap(),
        )
        .unwrap();

        let store = StoreConfig::from_json_file(&config_path).unwrap().open().unwrap();
        assert_eq!(store.backend(), "directory");

        store.set_item("books", "{}").unwrap();
        assert!(data_dir.join("books.json").exists());
        assert_eq!(store.get_item("books").unwrap().as_deref(), Some("{}"));
    }
}
