//! Registries - the in-memory collection of validated entities of one kind.
//!
//! A registry maps primary keys to entities and mirrors itself into a
//! [`KeyValueStore`] slot as one JSON object. It is loaded in bulk, mutated
//! through `add` / `update` / `destroy`, and written back in bulk.
//!
//! ## Example
//!
//! ```ignore
//! use catalog_rust::{Book, InMemoryKeyValueStore, RegistryExt, Slots};
//!
//! let store = InMemoryKeyValueStore::new();
//! let mut books = store.registry::<Book>();
//! books.retrieve_all()?;
//! books.add(&Slots::new()
//!     .with("isbn", "0465026567")
//!     .with("title", "Gödel, Escher, Bach")
//!     .with("year", 1999))?;
//! books.save_all()?;
//! ```

mod error;
mod registry;

use crate::record::Entity;
use crate::storage::KeyValueStore;

pub use error::RegistryError;
pub use registry::Registry;

/// Extension trait for opening a typed registry on any shareable store.
pub trait RegistryExt: KeyValueStore + Clone + Sized {
    /// An empty registry for `E` backed by a clone of this store.
    fn registry<E: Entity>(&self) -> Registry<E, Self> {
        Registry::new(self.clone())
    }
}

impl<S: KeyValueStore + Clone> RegistryExt for S {}
