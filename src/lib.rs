// Lets the derive macros name `catalog_rust::...` from inside this crate.
extern crate self as catalog_rust;

pub mod check;
mod config;
mod entities;
pub mod enumeration;
mod library;
mod record;
mod registry;
mod slots;
mod storage;
mod violation;

pub use config::{AnyStore, StoreConfig};
pub use entities::{
    first_screening, Author, Book, Genre, Movie, MovieRating, Publisher, MAX_TITLE_LENGTH,
    YEAR_FIRST_BOOK,
};
pub use enumeration::{Enumeration, EnumerationTable};
pub use library::{DanglingReference, Library};
pub use record::{Entity, KeyLookup, NoKeysTaken, Record, UpdateOutcome};
pub use registry::{Registry, RegistryError, RegistryExt};
pub use slots::Slots;
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore, StorageError};
pub use violation::ConstraintViolation;

// Derive macros share their trait's name, living in the macro namespace.
pub use catalog_rust_macros::{Enumeration, Record};
