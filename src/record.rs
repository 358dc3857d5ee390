//! Records - the contract every entity kind implements.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

use serde::Serialize;

use crate::slots::Slots;
use crate::violation::ConstraintViolation;

/// Storage identity of an entity kind. Usually derived with `#[derive(Record)]`.
pub trait Record {
    /// The store slot holding the whole collection (e.g. "books").
    const COLLECTION: &'static str;

    /// Singular human-readable kind used in log lines (e.g. "book").
    const KIND: &'static str;

    /// Primary key of this instance, as used for registry and storage keys.
    fn key(&self) -> String;
}

/// Keys already in use, consulted by identifier uniqueness checks.
pub trait KeyLookup {
    fn contains_key(&self, key: &str) -> bool;
}

impl<V> KeyLookup for BTreeMap<String, V> {
    fn contains_key(&self, key: &str) -> bool {
        BTreeMap::contains_key(self, key)
    }
}

impl KeyLookup for BTreeSet<String> {
    fn contains_key(&self, key: &str) -> bool {
        self.contains(key)
    }
}

impl KeyLookup for HashSet<String> {
    fn contains_key(&self, key: &str) -> bool {
        self.contains(key)
    }
}

/// Lookup with no keys taken, for constructing entities outside a registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoKeysTaken;

impl KeyLookup for NoKeysTaken {
    fn contains_key(&self, _key: &str) -> bool {
        false
    }
}

/// A validated record kind.
///
/// Serialization produces the persisted row: the entity's own attributes
/// under their storage names, optional attributes omitted when unset.
pub trait Entity: Record + Serialize + Clone + fmt::Debug + fmt::Display + Send + Sync {
    /// Slot name carrying the primary key (e.g. "isbn").
    const KEY_SLOT: &'static str;

    /// Construct from raw slots, running every attribute check.
    ///
    /// The identifier is checked for uniqueness against `taken`.
    fn from_slots(slots: &Slots, taken: &dyn KeyLookup) -> Result<Self, ConstraintViolation>;

    /// The primary key carried by `slots`, normalized exactly as
    /// [`Entity::from_slots`] would store it. `None` if it fails the format check.
    fn key_from_slots(slots: &Slots) -> Option<String>;

    /// Apply every non-key attribute in `slots` whose value differs from the
    /// current one. Returns the storage names of the changed attributes.
    ///
    /// On error `self` may be partially modified; callers work on a copy.
    fn apply_update(&mut self, slots: &Slots) -> Result<Vec<&'static str>, ConstraintViolation>;
}

/// Result of a successful registry update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Every supplied value equalled the stored one.
    Unchanged,
    /// The listed attributes were changed.
    Modified(Vec<&'static str>),
}

impl UpdateOutcome {
    pub fn from_fields(fields: Vec<&'static str>) -> Self {
        if fields.is_empty() {
            UpdateOutcome::Unchanged
        } else {
            UpdateOutcome::Modified(fields)
        }
    }

    pub fn fields(&self) -> &[&'static str] {
        match self {
            UpdateOutcome::Unchanged => &[],
            UpdateOutcome::Modified(fields) => fields,
        }
    }
}
