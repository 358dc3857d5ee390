//! Storage - string key-value persistence for serialized registries.
//!
//! A store holds one slot per entity kind (e.g. `"books"`), each containing
//! the whole collection as a JSON object. Stores are cheap to clone and
//! clones share the same backing data, so one store can serve several
//! registries.
//!
//! ## Example
//!
//! ```ignore
//! use catalog_rust::{InMemoryKeyValueStore, KeyValueStore};
//!
//! let store = InMemoryKeyValueStore::new();
//! store.set_item("books", "{}")?;
//! assert_eq!(store.get_item("books")?.as_deref(), Some("{}"));
//! ```

mod file;
mod in_memory;

use std::fmt;

/// Abstract string key-value storage.
pub trait KeyValueStore: Send + Sync {
    /// Read a slot. Returns None if it was never written.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a slot, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a slot. Returns true if it existed.
    fn remove_item(&self, key: &str) -> Result<bool, StorageError>;
}

/// Error type for store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    Io(String),
    /// A slot could not be serialized or parsed.
    Serde(String),
    /// A shared lock was poisoned by a panicking writer.
    LockPoisoned(&'static str),
    /// The key cannot be mapped onto the backing medium.
    InvalidKey(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(msg) => write!(f, "storage io error: {}", msg),
            StorageError::Serde(msg) => write!(f, "storage serialization error: {}", msg),
            StorageError::LockPoisoned(operation) => {
                write!(f, "storage lock poisoned during {}", operation)
            }
            StorageError::InvalidKey(key) => write!(f, "invalid storage key: {:?}", key),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serde(err.to_string())
    }
}

pub use file::FileKeyValueStore;
pub use in_memory::InMemoryKeyValueStore;
