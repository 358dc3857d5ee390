//! Entity kinds: books with their authors and publishers, and movies.

mod author;
mod book;
mod movie;
mod publisher;

pub use author::Author;
pub use book::{Book, YEAR_FIRST_BOOK};
pub use movie::{first_screening, Genre, Movie, MovieRating, MAX_TITLE_LENGTH};
pub use publisher::Publisher;
