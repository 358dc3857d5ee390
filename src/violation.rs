use std::fmt;

/// Why a candidate attribute value was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    /// A mandatory attribute has no value.
    MandatoryValue(String),
    /// The value is of the wrong type or outside its value space.
    Range(String),
    /// The value does not match the attribute's format.
    Pattern(String),
    /// The value lies outside an allowed interval.
    Interval(String),
    /// The identifier is already taken by another record.
    Uniqueness(String),
}

impl ConstraintViolation {
    /// Name of the violated constraint kind, e.g. `"MandatoryValueConstraintViolation"`.
    pub fn kind(&self) -> &'static str {
        match self {
            ConstraintViolation::MandatoryValue(_) => "MandatoryValueConstraintViolation",
            ConstraintViolation::Range(_) => "RangeConstraintViolation",
            ConstraintViolation::Pattern(_) => "PatternConstraintViolation",
            ConstraintViolation::Interval(_) => "IntervalConstraintViolation",
            ConstraintViolation::Uniqueness(_) => "UniquenessConstraintViolation",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ConstraintViolation::MandatoryValue(msg)
            | ConstraintViolation::Range(msg)
            | ConstraintViolation::Pattern(msg)
            | ConstraintViolation::Interval(msg)
            | ConstraintViolation::Uniqueness(msg) => msg,
        }
    }

    pub(crate) fn mandatory(msg: impl Into<String>) -> Self {
        ConstraintViolation::MandatoryValue(msg.into())
    }

    pub(crate) fn range(msg: impl Into<String>) -> Self {
        ConstraintViolation::Range(msg.into())
    }

    pub(crate) fn pattern(msg: impl Into<String>) -> Self {
        ConstraintViolation::Pattern(msg.into())
    }

    pub(crate) fn interval(msg: impl Into<String>) -> Self {
        ConstraintViolation::Interval(msg.into())
    }

    pub(crate) fn uniqueness(msg: impl Into<String>) -> Self {
        ConstraintViolation::Uniqueness(msg.into())
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind(), self.message())
    }
}

impl std::error::Error for ConstraintViolation {}
