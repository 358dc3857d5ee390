use std::fmt;

use crate::violation::ConstraintViolation;

/// Error type for registry updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A supplied value failed its attribute check.
    Violation(ConstraintViolation),
    /// No record is stored under the given key.
    NotFound { collection: String, id: String },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Violation(violation) => write!(f, "{}", violation),
            RegistryError::NotFound { collection, id } => {
                write!(f, "record not found: {}:{}", collection, id)
            }
        }
    }
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegistryError::Violation(violation) => Some(violation),
            RegistryError::NotFound { .. } => None,
        }
    }
}

impl From<ConstraintViolation> for RegistryError {
    fn from(err: ConstraintViolation) -> Self {
        RegistryError::Violation(err)
    }
}
