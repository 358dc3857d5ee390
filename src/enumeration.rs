//! Enumerations - closed sets of labelled values with 1-based integer codes.
//!
//! An enumeration is a fieldless Rust enum deriving [`Enumeration`]; codes
//! follow declaration order. Attributes holding enumeration values are
//! persisted as their codes.
//!
//! ## Example
//!
//! ```ignore
//! use catalog_rust::Enumeration;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Enumeration)]
//! enum Category {
//!     Novel,
//!     Biography,
//!     #[enumeration(label = "Text book")]
//!     Textbook,
//! }
//!
//! assert_eq!(Category::MAX, 3);
//! assert_eq!(Category::Textbook.code(), 3);
//! assert_eq!(Category::from_code(1), Some(Category::Novel));
//! ```

use std::fmt;

use serde_json::Value;

use crate::check;
use crate::slots;
use crate::violation::ConstraintViolation;

/// A closed, ordered set of named values.
pub trait Enumeration: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// All values in code order.
    const VARIANTS: &'static [Self];

    /// The highest valid code.
    const MAX: u32 = Self::VARIANTS.len() as u32;

    /// 1-based code of this value.
    fn code(&self) -> u32;

    /// Variant name, e.g. `"PG13"`.
    fn name(&self) -> &'static str;

    /// Display label, e.g. `"Not Under 13"`.
    fn label(&self) -> &'static str;

    fn from_code(code: u32) -> Option<Self> {
        let index = code.checked_sub(1)? as usize;
        Self::VARIANTS.get(index).copied()
    }
}

/// Check a single enumeration code for the attribute `attribute`.
pub fn check_code<E: Enumeration>(
    attribute: &str,
    value: Option<&Value>,
) -> Result<E, ConstraintViolation> {
    let value = match value {
        Some(value) => value,
        None => {
            return Err(ConstraintViolation::mandatory(format!(
                "A {} must be provided!",
                attribute
            )))
        }
    };

    check::integer(value)
        .and_then(|code| u32::try_from(code).ok())
        .and_then(E::from_code)
        .ok_or_else(|| {
            ConstraintViolation::range(format!("Invalid value for {}: {}", attribute, value))
        })
}

/// Check a multi-valued enumeration attribute element-wise.
pub fn check_codes<E: Enumeration>(
    attribute: &str,
    value: Option<&Value>,
) -> Result<Vec<E>, ConstraintViolation> {
    let items = match value {
        None => None,
        Some(Value::Array(items)) if items.is_empty() => None,
        Some(Value::Array(items)) => Some(items),
        Some(_) => {
            return Err(ConstraintViolation::range(format!(
                "The value of {} must be an array!",
                attribute
            )))
        }
    };

    let items = items.ok_or_else(|| {
        ConstraintViolation::mandatory(format!("No {} provided!", attribute))
    })?;

    items
        .iter()
        .map(|item| check_code::<E>(attribute, slots::provided(item)))
        .collect()
}

/// Comma-separated labels of a multi-valued selection.
pub fn selection_to_string<E: Enumeration>(selection: &[E]) -> String {
    selection
        .iter()
        .map(|value| value.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Element-wise equality of two selections, order included.
pub fn same_selection<E: Enumeration>(a: &[E], b: &[E]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
}

/// Serde adapter persisting an enumeration value as its code.
pub mod as_code {
    use serde::Serializer;

    use super::Enumeration;

    pub fn serialize<E: Enumeration, S: Serializer>(
        value: &E,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(value.code())
    }
}

/// Serde adapter persisting a selection as an array of codes.
pub mod as_codes {
    use serde::Serializer;

    use super::Enumeration;

    pub fn serialize<E: Enumeration, S: Serializer>(
        values: &[E],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(values.iter().map(|value| value.code()))
    }
}

/// Display-only lookup table from codes to names and labels.
///
/// Built from an ordered label list (codes follow position), from a
/// name to label mapping, or from a derived [`Enumeration`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumerationTable {
    entries: Vec<(String, String)>,
}

impl EnumerationTable {
    /// Build from ordered labels. Names are the labels upper-cased with
    /// `-` and spaces replaced by `_` (`"Sci-Fi"` becomes `SCI_FI`).
    pub fn from_labels<I, L>(labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        let entries = labels
            .into_iter()
            .map(|label| {
                let label = label.into();
                let name = label.to_uppercase().replace(['-', ' '], "_");
                (name, label)
            })
            .collect();
        Self { entries }
    }

    /// Build from `(name, label)` pairs in code order.
    pub fn from_names<I, N, L>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, L)>,
        N: Into<String>,
        L: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(name, label)| (name.into(), label.into()))
            .collect();
        Self { entries }
    }

    pub fn of<E: Enumeration>() -> Self {
        Self::from_names(E::VARIANTS.iter().map(|v| (v.name(), v.label())))
    }

    pub fn max(&self) -> u32 {
        self.entries.len() as u32
    }

    pub fn label(&self, code: u32) -> Option<&str> {
        self.entry(code).map(|(_, label)| label.as_str())
    }

    pub fn name(&self, code: u32) -> Option<&str> {
        self.entry(code).map(|(name, _)| name.as_str())
    }

    pub fn code_of(&self, name: &str) -> Option<u32> {
        self.entries
            .iter()
            .position(|(n, _)| n == name)
            .map(|index| index as u32 + 1)
    }

    /// Comma-separated labels for a list of codes; unknown codes are skipped.
    pub fn stringify(&self, codes: &[u32]) -> String {
        codes
            .iter()
            .filter_map(|code| self.label(*code))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn entry(&self, code: u32) -> Option<&(String, String)> {
        let index = code.checked_sub(1)? as usize;
        self.entries.get(index)
    }
}
