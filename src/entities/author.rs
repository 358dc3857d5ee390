use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::check;
use crate::record::{Entity, KeyLookup};
use crate::slots::{self, Slots};
use crate::violation::ConstraintViolation;
use crate::Record;

/// A book author, identified by a positive integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Record)]
#[record(collection = "authors", kind = "author")]
pub struct Author {
    #[record(key)]
    #[serde(rename = "authorId")]
    author_id: u32,
    name: String,
}

impl Author {
    pub fn author_id(&self) -> u32 {
        self.author_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn check_author_id(value: &Value) -> Result<u32, ConstraintViolation> {
        check::integer(value)
            .filter(|id| *id >= 1)
            .and_then(|id| u32::try_from(id).ok())
            .ok_or_else(|| ConstraintViolation::range("The author ID must be a positive integer!"))
    }

    pub fn check_author_id_as_id(
        value: Option<&Value>,
        taken: &dyn KeyLookup,
    ) -> Result<u32, ConstraintViolation> {
        let value = value.ok_or_else(|| {
            ConstraintViolation::mandatory("A value for the author ID must be provided!")
        })?;
        let id = Self::check_author_id(value)?;
        if taken.contains_key(&id.to_string()) {
            return Err(ConstraintViolation::uniqueness(
                "There is already an author record with this ID!",
            ));
        }
        Ok(id)
    }

    pub fn check_name(value: Option<&Value>) -> Result<String, ConstraintViolation> {
        let value = value.ok_or_else(|| ConstraintViolation::mandatory("A name must be provided!"))?;
        check::non_empty_string(value)
            .map(str::to_string)
            .ok_or_else(|| ConstraintViolation::range("The name must be a non-empty string!"))
    }

    pub fn set_name(&mut self, value: impl Into<Value>) -> Result<(), ConstraintViolation> {
        self.name = Self::check_name(slots::provided(&value.into()))?;
        Ok(())
    }
}

impl Entity for Author {
    const KEY_SLOT: &'static str = "authorId";

    fn from_slots(slots: &Slots, taken: &dyn KeyLookup) -> Result<Self, ConstraintViolation> {
        Ok(Author {
            author_id: Self::check_author_id_as_id(slots.get("authorId"), taken)?,
            name: Self::check_name(slots.get("name"))?,
        })
    }

    fn key_from_slots(slots: &Slots) -> Option<String> {
        let id = Self::check_author_id(slots.get("authorId")?).ok()?;
        Some(id.to_string())
    }

    fn apply_update(&mut self, slots: &Slots) -> Result<Vec<&'static str>, ConstraintViolation> {
        let name = Self::check_name(slots.get("name"))?;
        if name == self.name {
            return Ok(Vec::new());
        }
        self.name = name;
        Ok(vec!["name"])
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Author{{ authorId: {}, name: {} }}", self.author_id, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::NoKeysTaken;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn id_accepts_integer_or_integer_string() {
        let a = Author::from_slots(
            &Slots::new().with("authorId", 1).with("name", "Daniel Dennett"),
            &NoKeysTaken,
        )
        .unwrap();
        let b = Author::from_slots(
            &Slots::new().with("authorId", "2").with("name", "Douglas Hofstadter"),
            &NoKeysTaken,
        )
        .unwrap();

        assert_eq!(a.author_id(), 1);
        assert_eq!(b.author_id(), 2);
        assert_eq!(b.key(), "2");
    }

    #[test]
    fn id_must_be_positive_and_unique() {
        assert!(matches!(
            Author::check_author_id(&json!(-4)),
            Err(ConstraintViolation::Range(_))
        ));
        assert!(matches!(
            Author::check_author_id_as_id(None, &NoKeysTaken),
            Err(ConstraintViolation::MandatoryValue(_))
        ));

        let mut taken = BTreeMap::new();
        taken.insert("3".to_string(), ());
        assert!(matches!(
            Author::check_author_id_as_id(Some(&json!("3")), &taken),
            Err(ConstraintViolation::Uniqueness(_))
        ));
    }

    #[test]
    fn update_renames() {
        let mut author = Author::from_slots(
            &Slots::new().with("authorId", 3).with("name", "Kant"),
            &NoKeysTaken,
        )
        .unwrap();

        let changed = author
            .apply_update(&Slots::new().with("authorId", 3).with("name", "Immanuel Kant"))
            .unwrap();
        assert_eq!(changed, vec!["name"]);
        assert_eq!(author.name(), "Immanuel Kant");

        assert!(author.set_name("  ").is_err());
        assert_eq!(author.name(), "Immanuel Kant");
    }

    #[test]
    fn serializes_numeric_id() {
        let author = Author::from_slots(
            &Slots::new().with("authorId", "2").with("name", "Douglas Hofstadter"),
            &NoKeysTaken,
        )
        .unwrap();
        assert_eq!(
            serde_json::to_value(&author).unwrap(),
            json!({"authorId": 2, "name": "Douglas Hofstadter"})
        );
        assert_eq!(author.to_string(), "Author{ authorId: 2, name: Douglas Hofstadter }");
    }
}
