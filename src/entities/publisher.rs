use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::check;
use crate::record::{Entity, KeyLookup, NoKeysTaken};
use crate::slots::{self, Slots};
use crate::violation::ConstraintViolation;
use crate::Record;

/// A publisher, identified by its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Record)]
#[record(collection = "publishers", kind = "publisher")]
pub struct Publisher {
    #[record(key)]
    name: String,
    address: String,
}

impl Publisher {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn check_name_as_id(
        value: Option<&Value>,
        taken: &dyn KeyLookup,
    ) -> Result<String, ConstraintViolation> {
        let value = value.ok_or_else(|| {
            ConstraintViolation::mandatory("A publisher name must be provided!")
        })?;
        let name = check::non_empty_string(value).ok_or_else(|| {
            ConstraintViolation::range("The publisher name must be a non-empty string!")
        })?;
        if taken.contains_key(name) {
            return Err(ConstraintViolation::uniqueness(
                "There is already a publisher record with this name!",
            ));
        }
        Ok(name.to_string())
    }

    pub fn check_address(value: Option<&Value>) -> Result<String, ConstraintViolation> {
        let value =
            value.ok_or_else(|| ConstraintViolation::mandatory("An address must be provided!"))?;
        check::non_empty_string(value)
            .map(str::to_string)
            .ok_or_else(|| ConstraintViolation::range("The address must be a non-empty string!"))
    }

    pub fn set_address(&mut self, value: impl Into<Value>) -> Result<(), ConstraintViolation> {
        self.address = Self::check_address(slots::provided(&value.into()))?;
        Ok(())
    }
}

impl Entity for Publisher {
    const KEY_SLOT: &'static str = "name";

    fn from_slots(slots: &Slots, taken: &dyn KeyLookup) -> Result<Self, ConstraintViolation> {
        Ok(Publisher {
            name: Self::check_name_as_id(slots.get("name"), taken)?,
            address: Self::check_address(slots.get("address"))?,
        })
    }

    fn key_from_slots(slots: &Slots) -> Option<String> {
        Self::check_name_as_id(slots.get("name"), &NoKeysTaken).ok()
    }

    fn apply_update(&mut self, slots: &Slots) -> Result<Vec<&'static str>, ConstraintViolation> {
        let address = Self::check_address(slots.get("address"))?;
        if address == self.address {
            return Ok(Vec::new());
        }
        self.address = address;
        Ok(vec!["address"])
    }
}

impl fmt::Display for Publisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Publisher{{ name: {}, address: {} }}", self.name, self.address)
    }
}
