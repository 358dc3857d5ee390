//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Once;

use catalog_rust::{Enumeration, Genre, MovieRating, Slots};
use serde_json::json;

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness so it shows up for
/// failing tests only.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

pub fn geb() -> Slots {
    Slots::new()
        .with("isbn", "0465026567")
        .with("title", "Gödel, Escher, Bach")
        .with("year", 1999)
}

pub fn weaving_the_web() -> Slots {
    Slots::new()
        .with("isbn", "006251587X")
        .with("title", "Weaving the Web")
        .with("year", 2000)
        .with("edition", 2)
}

pub fn strange_loop() -> Slots {
    Slots::new()
        .with("isbn", "0465030793")
        .with("title", "I Am A Strange Loop")
        .with("year", 2008)
}

pub fn pulp_fiction() -> Slots {
    Slots::new()
        .with("movieId", "1")
        .with("title", "Pulp Fiction")
        .with("releaseDate", "1994-05-12")
        .with("rating", MovieRating::R.code())
        .with("genres", json!([Genre::Crime.code(), Genre::Drama.code()]))
}

pub fn star_wars() -> Slots {
    Slots::new()
        .with("movieId", "2")
        .with("title", "Star Wars")
        .with("releaseDate", "1977-05-25")
        .with("rating", MovieRating::PG.code())
        .with(
            "genres",
            json!([
                Genre::Action.code(),
                Genre::Adventure.code(),
                Genre::Fantasy.code(),
                Genre::SciFi.code()
            ]),
        )
}
