//! Library - authors, publishers and books sharing one store.
//!
//! Books reference authors and a publisher by key. The references are not
//! enforced when a book is stored; [`Library::dangling_references`] reports
//! the ones whose target is missing.

use std::fmt;

use tracing::{info, warn};

use crate::entities::{Author, Book, Publisher};
use crate::registry::{Registry, RegistryExt};
use crate::storage::{KeyValueStore, StorageError};

/// A book reference with no matching record in the target registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DanglingReference {
    Author { isbn: String, author_id: u32 },
    Publisher { isbn: String, publisher_id: String },
}

impl fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DanglingReference::Author { isbn, author_id } => {
                write!(f, "book {} references unknown author {}", isbn, author_id)
            }
            DanglingReference::Publisher { isbn, publisher_id } => {
                write!(f, "book {} references unknown publisher {}", isbn, publisher_id)
            }
        }
    }
}

pub struct Library<S> {
    pub authors: Registry<Author, S>,
    pub publishers: Registry<Publisher, S>,
    pub books: Registry<Book, S>,
}

impl<S: KeyValueStore + Clone> Library<S> {
    pub fn new(store: S) -> Self {
        Self {
            authors: store.registry(),
            publishers: store.registry(),
            books: store.registry(),
        }
    }

    /// Load all three collections. Referenced records are loaded first.
    pub fn retrieve_all(&mut self) -> Result<(), StorageError> {
        let authors = self.authors.retrieve_all()?;
        let publishers = self.publishers.retrieve_all()?;
        let books = self.books.retrieve_all()?;
        info!(authors, publishers, books, "library loaded");
        Ok(())
    }

    pub fn save_all(&self) -> Result<(), StorageError> {
        self.authors.save_all()?;
        self.publishers.save_all()?;
        self.books.save_all()?;
        Ok(())
    }

    /// Book references whose author or publisher is not in this library,
    /// in ISBN order.
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let mut dangling = Vec::new();

        for book in self.books.instances().values() {
            for author_id in book.author_ids() {
                if !self.authors.contains_key(&author_id.to_string()) {
                    dangling.push(DanglingReference::Author {
                        isbn: book.isbn().to_string(),
                        author_id: *author_id,
                    });
                }
            }
            if let Some(publisher_id) = book.publisher_id() {
                if !self.publishers.contains_key(publisher_id) {
                    dangling.push(DanglingReference::Publisher {
                        isbn: book.isbn().to_string(),
                        publisher_id: publisher_id.to_string(),
                    });
                }
            }
        }

        if !dangling.is_empty() {
            warn!(count = dangling.len(), "dangling book references");
        }
        dangling
    }
}
