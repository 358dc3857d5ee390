//! Slots - the raw input bundle handed to entity construction and update.
//!
//! Values arrive untyped (form fields, persisted JSON rows), so slots hold
//! `serde_json::Value`s and leave coercion to the per-attribute checks.

use serde_json::{Map, Value};

/// Field name to raw value mapping, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slots {
    values: Map<String, Value>,
}

impl Slots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    /// The raw value, including blank ones.
    pub fn raw(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// The value if it counts as provided.
    ///
    /// `null`, `false`, `0` and the empty string count as not provided.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name).filter(|value| !is_blank(value))
    }

    /// Build slots from a persisted record. Anything but a JSON object yields
    /// empty slots, which then fail the mandatory checks.
    pub fn from_record(record: &Value) -> Self {
        match record {
            Value::Object(map) => Self::from(map.clone()),
            _ => Self::default(),
        }
    }
}

impl From<Map<String, Value>> for Slots {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

/// `Some(value)` unless the value is blank.
pub(crate) fn provided(value: &Value) -> Option<&Value> {
    Some(value).filter(|v| !is_blank(v))
}

pub(crate) fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}
