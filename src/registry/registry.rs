use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};

use super::RegistryError;
use crate::record::{Entity, UpdateOutcome};
use crate::slots::Slots;
use crate::storage::{KeyValueStore, StorageError};
use crate::violation::ConstraintViolation;

/// Key-unique collection of validated entities of kind `E`, persisted in `S`.
///
/// Entities only enter through [`Registry::add`] or [`Registry::retrieve_all`],
/// so every stored value has passed its full constructor validation.
pub struct Registry<E, S> {
    store: S,
    instances: BTreeMap<String, E>,
}

impl<E: Entity, S: KeyValueStore> Registry<E, S> {
    /// An empty registry. Call [`Registry::retrieve_all`] to load persisted records.
    pub fn new(store: S) -> Self {
        Self {
            store,
            instances: BTreeMap::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All entities, keyed by primary key.
    pub fn instances(&self) -> &BTreeMap<String, E> {
        &self.instances
    }

    pub fn get(&self, id: &str) -> Option<&E> {
        self.instances.get(id)
    }

    pub fn contains_key(&self, id: &str) -> bool {
        self.instances.contains_key(id)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.instances.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Drop every entity from memory. The store is untouched until the next save.
    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Replace the in-memory collection with the persisted one.
    ///
    /// Every row is rebuilt through [`Entity::from_slots`]; rows that fail
    /// validation are logged and skipped. A missing slot loads nothing.
    /// On a read or parse failure the registry keeps its previous contents.
    pub fn retrieve_all(&mut self) -> Result<usize, StorageError> {
        let blob = self.store.get_item(E::COLLECTION).map_err(|err| {
            error!(collection = E::COLLECTION, error = %err, "failed to read collection");
            err
        })?;

        let rows: Map<String, Value> = match blob.as_deref().map(str::trim) {
            None | Some("") => Map::new(),
            Some(text) => serde_json::from_str(text).map_err(|err| {
                error!(collection = E::COLLECTION, error = %err, "failed to parse collection");
                StorageError::from(err)
            })?,
        };

        let mut loaded: BTreeMap<String, E> = BTreeMap::new();
        for (key, row) in &rows {
            match E::from_slots(&Slots::from_record(row), &loaded) {
                Ok(entity) => {
                    let entity_key = entity.key();
                    if entity_key != *key {
                        warn!(
                            collection = E::COLLECTION,
                            stored_key = %key,
                            id = %entity_key,
                            "record stored under a different key"
                        );
                    }
                    loaded.insert(entity_key, entity);
                }
                Err(violation) => {
                    warn!(
                        collection = E::COLLECTION,
                        id = %key,
                        %violation,
                        "skipping {} record that failed validation",
                        E::KIND
                    );
                }
            }
        }

        let count = loaded.len();
        self.instances = loaded;
        info!(collection = E::COLLECTION, count, skipped = rows.len() - count, "collection loaded");
        Ok(count)
    }

    /// Validate `slots` and insert the new entity.
    ///
    /// The primary key must not be taken yet, so `add` never replaces an
    /// existing entity. On failure nothing is inserted.
    pub fn add(&mut self, slots: &Slots) -> Result<&E, ConstraintViolation> {
        let entity = E::from_slots(slots, &self.instances).map_err(|violation| {
            warn!(collection = E::COLLECTION, %violation, "{} not created", E::KIND);
            violation
        })?;

        let id = entity.key();
        debug!(collection = E::COLLECTION, id = %id, "{} created", entity);
        Ok(self.instances.entry(id).or_insert(entity))
    }

    /// Apply the attributes in `slots` that differ from the stored entity.
    ///
    /// The entity is looked up by the key slot. Changes are made on a copy
    /// and only committed when every check passes, so a rejected update
    /// leaves the stored entity exactly as it was.
    pub fn update(&mut self, slots: &Slots) -> Result<UpdateOutcome, RegistryError> {
        // Normalize through the entity's key check so the lookup matches the
        // key `add` stored; fall back to the raw text for the not-found report.
        let id = E::key_from_slots(slots)
            .or_else(|| raw_key::<E>(slots))
            .unwrap_or_default();

        let current = match self.instances.get(&id) {
            Some(entity) => entity,
            None => {
                warn!(collection = E::COLLECTION, id = %id, "no {} to update", E::KIND);
                return Err(RegistryError::NotFound {
                    collection: E::COLLECTION.to_string(),
                    id,
                });
            }
        };

        let mut working = current.clone();
        let fields = working.apply_update(slots).map_err(|violation| {
            warn!(collection = E::COLLECTION, id = %id, %violation, "{} not updated", E::KIND);
            RegistryError::Violation(violation)
        })?;

        let outcome = UpdateOutcome::from_fields(fields);
        match &outcome {
            UpdateOutcome::Unchanged => {
                info!(collection = E::COLLECTION, id = %id, "no property value changed");
            }
            UpdateOutcome::Modified(fields) => {
                info!(collection = E::COLLECTION, id = %id, ?fields, "properties modified");
                self.instances.insert(id, working);
            }
        }
        Ok(outcome)
    }

    /// Remove the entity stored under `id`, returning it.
    pub fn destroy(&mut self, id: &str) -> Option<E> {
        match self.instances.remove(id) {
            Some(entity) => {
                debug!(collection = E::COLLECTION, id = %id, "{} deleted", entity);
                Some(entity)
            }
            None => {
                warn!(collection = E::COLLECTION, id = %id, "no {} to delete", E::KIND);
                None
            }
        }
    }

    /// The whole collection as the JSON object written to the store.
    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(&self.instances)?)
    }

    /// Write the whole collection to the store. Safe to call repeatedly; a
    /// failure leaves the in-memory collection as it was.
    pub fn save_all(&self) -> Result<usize, StorageError> {
        let count = self.instances.len();
        let result = self
            .to_json()
            .and_then(|blob| self.store.set_item(E::COLLECTION, &blob));

        match result {
            Ok(()) => {
                info!(collection = E::COLLECTION, count, "collection saved");
                Ok(count)
            }
            Err(err) => {
                error!(collection = E::COLLECTION, error = %err, "failed to save collection");
                Err(err)
            }
        }
    }
}

fn raw_key<E: Entity>(slots: &Slots) -> Option<String> {
    match slots.get(E::KEY_SLOT)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
