use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::check;
use crate::record::{Entity, KeyLookup};
use crate::slots::{self, Slots};
use crate::violation::ConstraintViolation;
use crate::Record;

/// Year the first printed book appeared; earlier years are rejected.
pub const YEAR_FIRST_BOOK: i32 = 1459;

/// A book, identified by its 10-character ISBN.
///
/// Optionally references its authors by id and its publisher by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Record)]
#[record(collection = "books", kind = "book")]
pub struct Book {
    #[record(key)]
    isbn: String,
    title: String,
    year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    edition: Option<u32>,
    #[serde(rename = "authorIdRefs", skip_serializing_if = "Vec::is_empty")]
    author_ids: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    publisher_id: Option<String>,
}

impl Book {
    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn edition(&self) -> Option<u32> {
        self.edition
    }

    pub fn author_ids(&self) -> &[u32] {
        &self.author_ids
    }

    pub fn publisher_id(&self) -> Option<&str> {
        self.publisher_id.as_deref()
    }

    // ------------------------------------------------------------------
    // Checks
    // ------------------------------------------------------------------

    /// Format check for a provided ISBN: 9 digits followed by a digit or `X`.
    pub fn check_isbn(value: &Value) -> Result<String, ConstraintViolation> {
        let isbn = check::non_empty_string(value)
            .ok_or_else(|| ConstraintViolation::range("The ISBN must be a non-empty string!"))?;

        let bytes = isbn.as_bytes();
        let well_formed = bytes.len() == 10
            && bytes[..9].iter().all(u8::is_ascii_digit)
            && (bytes[9].is_ascii_digit() || bytes[9] == b'X');
        if !well_formed {
            return Err(ConstraintViolation::pattern(
                "The ISBN must be a 10-digit string or a 9-digit string followed by \"X\"!",
            ));
        }

        Ok(isbn.to_string())
    }

    /// ISBN as primary key: mandatory, well-formed and not yet taken.
    pub fn check_isbn_as_id(
        value: Option<&Value>,
        taken: &dyn KeyLookup,
    ) -> Result<String, ConstraintViolation> {
        let value = value.ok_or_else(|| {
            ConstraintViolation::mandatory("A value for the ISBN must be provided!")
        })?;
        let isbn = Self::check_isbn(value)?;
        if taken.contains_key(&isbn) {
            return Err(ConstraintViolation::uniqueness(
                "There is already a book record with this ISBN!",
            ));
        }
        Ok(isbn)
    }

    pub fn check_title(value: Option<&Value>) -> Result<String, ConstraintViolation> {
        let value =
            value.ok_or_else(|| ConstraintViolation::mandatory("A title must be provided!"))?;
        check::non_empty_string(value)
            .map(str::to_string)
            .ok_or_else(|| ConstraintViolation::range("The title must be a non-empty string!"))
    }

    pub fn check_year(value: Option<&Value>) -> Result<i32, ConstraintViolation> {
        let value = value.ok_or_else(|| {
            ConstraintViolation::mandatory("A publication year must be provided!")
        })?;
        let year = check::integer(value)
            .ok_or_else(|| ConstraintViolation::range("The value of year must be an integer!"))?;

        let next_year = check::next_year();
        match i32::try_from(year) {
            Ok(year) if (YEAR_FIRST_BOOK..=next_year).contains(&year) => Ok(year),
            _ => Err(ConstraintViolation::interval(format!(
                "The value of year must be between {} and next year!",
                YEAR_FIRST_BOOK
            ))),
        }
    }

    pub fn check_edition(value: Option<&Value>) -> Result<Option<u32>, ConstraintViolation> {
        let value = match value {
            Some(value) => value,
            None => return Ok(None),
        };
        check::integer(value)
            .filter(|edition| *edition >= 1)
            .and_then(|edition| u32::try_from(edition).ok())
            .map(Some)
            .ok_or_else(|| {
                ConstraintViolation::range("The value of edition must be a positive integer!")
            })
    }

    pub fn check_author_ids(value: Option<&Value>) -> Result<Vec<u32>, ConstraintViolation> {
        let items = match value {
            None => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(ConstraintViolation::range(
                    "The author references must be an array of author IDs!",
                ))
            }
        };

        items
            .iter()
            .map(|item| {
                check::integer(item)
                    .filter(|id| *id >= 1)
                    .and_then(|id| u32::try_from(id).ok())
                    .ok_or_else(|| {
                        ConstraintViolation::range(format!(
                            "Invalid author reference: {} is not a positive integer!",
                            item
                        ))
                    })
            })
            .collect()
    }

    pub fn check_publisher_id(value: Option<&Value>) -> Result<Option<String>, ConstraintViolation> {
        match value {
            None => Ok(None),
            Some(value) => check::non_empty_string(value)
                .map(|name| Some(name.to_string()))
                .ok_or_else(|| {
                    ConstraintViolation::range("The publisher reference must be a non-empty string!")
                }),
        }
    }

    // ------------------------------------------------------------------
    // Setters
    // ------------------------------------------------------------------

    pub fn set_title(&mut self, value: impl Into<Value>) -> Result<(), ConstraintViolation> {
        self.title = Self::check_title(slots::provided(&value.into()))?;
        Ok(())
    }

    pub fn set_year(&mut self, value: impl Into<Value>) -> Result<(), ConstraintViolation> {
        self.year = Self::check_year(slots::provided(&value.into()))?;
        Ok(())
    }

    /// Set or, with a blank value, unset the edition.
    pub fn set_edition(&mut self, value: impl Into<Value>) -> Result<(), ConstraintViolation> {
        self.edition = Self::check_edition(slots::provided(&value.into()))?;
        Ok(())
    }

    pub fn set_author_ids(&mut self, value: impl Into<Value>) -> Result<(), ConstraintViolation> {
        self.author_ids = Self::check_author_ids(slots::provided(&value.into()))?;
        Ok(())
    }

    pub fn set_publisher_id(&mut self, value: impl Into<Value>) -> Result<(), ConstraintViolation> {
        self.publisher_id = Self::check_publisher_id(slots::provided(&value.into()))?;
        Ok(())
    }
}

impl Entity for Book {
    const KEY_SLOT: &'static str = "isbn";

    fn from_slots(slots: &Slots, taken: &dyn KeyLookup) -> Result<Self, ConstraintViolation> {
        Ok(Book {
            isbn: Self::check_isbn_as_id(slots.get("isbn"), taken)?,
            title: Self::check_title(slots.get("title"))?,
            year: Self::check_year(slots.get("year"))?,
            edition: Self::check_edition(slots.get("edition"))?,
            author_ids: Self::check_author_ids(slots.get("authorIdRefs"))?,
            publisher_id: Self::check_publisher_id(slots.get("publisher_id"))?,
        })
    }

    fn key_from_slots(slots: &Slots) -> Option<String> {
        Self::check_isbn(slots.get("isbn")?).ok()
    }

    fn apply_update(&mut self, slots: &Slots) -> Result<Vec<&'static str>, ConstraintViolation> {
        let mut changed = Vec::new();

        let title = Self::check_title(slots.get("title"))?;
        if title != self.title {
            self.title = title;
            changed.push("title");
        }

        let year = Self::check_year(slots.get("year"))?;
        if year != self.year {
            self.year = year;
            changed.push("year");
        }

        // A missing edition slot unsets the edition.
        let edition = Self::check_edition(slots.get("edition"))?;
        if edition != self.edition {
            self.edition = edition;
            changed.push("edition");
        }

        // Associations are only touched when the slot is supplied.
        if slots.raw("authorIdRefs").is_some() {
            let author_ids = Self::check_author_ids(slots.get("authorIdRefs"))?;
            if author_ids != self.author_ids {
                self.author_ids = author_ids;
                changed.push("authorIdRefs");
            }
        }

        if slots.raw("publisher_id").is_some() {
            let publisher_id = Self::check_publisher_id(slots.get("publisher_id"))?;
            if publisher_id != self.publisher_id {
                self.publisher_id = publisher_id;
                changed.push("publisher_id");
            }
        }

        Ok(changed)
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Book{{ ISBN: {}, title: {}, year: {}",
            self.isbn, self.title, self.year
        )?;
        if let Some(edition) = self.edition {
            write!(f, ", edition: {}", edition)?;
        }
        if !self.author_ids.is_empty() {
            let ids: Vec<String> = self.author_ids.iter().map(u32::to_string).collect();
            write!(f, ", authors: {}", ids.join(","))?;
        }
        if let Some(publisher) = &self.publisher_id {
            write!(f, ", publisher: {}", publisher)?;
        }
        write!(f, " }}")
    }
}
