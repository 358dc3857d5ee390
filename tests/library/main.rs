//! Integration tests for the multi-collection library.

#[path = "../support/mod.rs"]
mod support;

mod fixtures;

use catalog_rust::{DanglingReference, InMemoryKeyValueStore, KeyValueStore, Library, Slots};
use fixtures::seeded_library;
use support::init_tracing;

#[test]
fn library_round_trips_all_collections() {
    init_tracing();
    let store = InMemoryKeyValueStore::new();
    seeded_library(&store).save_all().unwrap();

    let mut reloaded = Library::new(store.clone());
    reloaded.retrieve_all().unwrap();

    assert_eq!(reloaded.authors.len(), 2);
    assert_eq!(reloaded.publishers.len(), 1);
    assert_eq!(reloaded.books.len(), 2);
    assert_eq!(reloaded.authors.get("2").unwrap().name(), "Douglas Hofstadter");
    assert_eq!(
        reloaded.books.get("0465030815").unwrap().author_ids(),
        &[1, 2]
    );
    assert!(reloaded.dangling_references().is_empty());
}

#[test]
fn deleting_referenced_records_is_detected_after_reload() {
    init_tracing();
    let store = InMemoryKeyValueStore::new();
    let mut library = seeded_library(&store);

    library.authors.destroy("1").unwrap();
    library.publishers.destroy("Basic Books").unwrap();
    library.save_all().unwrap();

    let mut reloaded = Library::new(store.clone());
    reloaded.retrieve_all().unwrap();
    assert_eq!(
        reloaded.dangling_references(),
        vec![
            DanglingReference::Publisher {
                isbn: "0465030793".into(),
                publisher_id: "Basic Books".into(),
            },
            DanglingReference::Author {
                isbn: "0465030815".into(),
                author_id: 1,
            },
        ]
    );
}

#[test]
fn author_update_and_publisher_address_change() {
    let store = InMemoryKeyValueStore::new();
    let mut library = seeded_library(&store);

    let outcome = library
        .publishers
        .update(
            &Slots::new()
                .with("name", "Basic Books")
                .with("address", "Boston, USA"),
        )
        .unwrap();
    assert_eq!(outcome.fields(), &["address"]);

    let outcome = library
        .authors
        .update(&Slots::new().with("authorId", "1").with("name", "Daniel C. Dennett"))
        .unwrap();
    assert_eq!(outcome.fields(), &["name"]);

    library.save_all().unwrap();
    assert!(store.get_item("authors").unwrap().unwrap().contains("Daniel C. Dennett"));
}

#[test]
fn empty_store_loads_empty_library() {
    let mut library = Library::new(InMemoryKeyValueStore::new());
    library.retrieve_all().unwrap();
    assert!(library.authors.is_empty());
    assert!(library.books.is_empty());
    assert!(library.dangling_references().is_empty());
}

#[test]
fn author_added_with_float_id_can_be_updated() {
    let mut library = Library::new(InMemoryKeyValueStore::new());
    library
        .authors
        .add(&Slots::new().with("authorId", 3.0).with("name", "Steven Pinker"))
        .unwrap();

    let outcome = library
        .authors
        .update(&Slots::new().with("authorId", 3.0).with("name", "Steven A. Pinker"))
        .unwrap();
    assert_eq!(outcome.fields(), &["name"]);
    assert_eq!(library.authors.get("3").unwrap().name(), "Steven A. Pinker");
}
