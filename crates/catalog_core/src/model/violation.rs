//! Rule violations reported by validation and services.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Category of a reported violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationKind {
    /// A mandatory attribute is missing or blank.
    EmptyField,
    /// A value fails a format check, references a missing record, or
    /// duplicates an existing identity or association.
    InvalidField,
}

impl ViolationKind {
    /// Returns the stable wire code for this kind.
    pub fn code(self) -> &'static str {
        match self {
            Self::EmptyField => "EMPTY_FIELD",
            Self::InvalidField => "INVALID_FIELD",
        }
    }
}

/// A single field-level or cross-record rule failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,
    /// External field name, e.g. `taxId`.
    pub field: String,
    /// Human-readable explanation.
    pub description: String,
}

impl Violation {
    pub fn empty_field(field: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: ViolationKind::EmptyField,
            field: field.into(),
            description: description.into(),
        }
    }

    pub fn invalid_field(field: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: ViolationKind::InvalidField,
            field: field.into(),
            description: description.into(),
        }
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.kind.code(), self.field, self.description)
    }
}
