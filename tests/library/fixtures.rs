use catalog_rust::{InMemoryKeyValueStore, Library, Slots};
use serde_json::json;

/// Two authors, one publisher and two books referencing them.
pub fn seeded_library(store: &InMemoryKeyValueStore) -> Library<InMemoryKeyValueStore> {
    let mut library = Library::new(store.clone());

    for (id, name) in [(1, "Daniel Dennett"), (2, "Douglas Hofstadter")] {
        library
            .authors
            .add(&Slots::new().with("authorId", id).with("name", name))
            .unwrap();
    }
    library
        .publishers
        .add(
            &Slots::new()
                .with("name", "Basic Books")
                .with("address", "New York, USA"),
        )
        .unwrap();

    library
        .books
        .add(
            &Slots::new()
                .with("isbn", "0465030793")
                .with("title", "I Am A Strange Loop")
                .with("year", 2008)
                .with("authorIdRefs", json!([2]))
                .with("publisher_id", "Basic Books"),
        )
        .unwrap();
    library
        .books
        .add(
            &Slots::new()
                .with("isbn", "0465030815")
                .with("title", "The Mind's I")
                .with("year", 1981)
                .with("authorIdRefs", json!([1, 2])),
        )
        .unwrap();

    library
}
