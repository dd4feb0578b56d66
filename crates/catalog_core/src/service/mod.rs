//! Catalog use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, existence checks and repository mutations into
//!   create/update/delete workflows that fully apply or fully reject.
//! - Return outcomes as values; no service keeps error state between calls.
//!
//! # Invariants
//! - `ServiceError::Rejected` always carries a non-empty violation list and
//!   guarantees that nothing was written.
//! - Storage failures are reported as `ServiceError::Storage` without
//!   violation detail.

pub mod record_service;
pub mod relation_service;

use crate::model::violation::Violation;
use crate::repo::RepoError;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure of a catalog use-case.
#[derive(Debug)]
pub enum ServiceError {
    /// Business rules rejected the operation; no mutation was applied.
    Rejected(Vec<Violation>),
    /// Persistence-layer failure.
    Storage(RepoError),
}

impl ServiceError {
    /// Returns the reported violations; empty for storage failures.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Rejected(violations) => violations,
            Self::Storage(_) => &[],
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(violations) => {
                write!(f, "operation rejected with {} violation(s)", violations.len())?;
                for violation in violations {
                    write!(f, "; {violation}")?;
                }
                Ok(())
            }
            Self::Storage(err) => write!(f, "storage failure: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Rejected(_) => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

/// Response envelope for request-handling layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationReport {
    /// Whether the operation was applied.
    pub ok: bool,
    /// Human-readable summary.
    pub message: String,
    /// Reported violations; empty on success and on storage failure.
    pub violations: Vec<Violation>,
}

impl OperationReport {
    /// Builds a report for `action` (e.g. `"create restaurant"`).
    pub fn from_result<T>(action: &str, result: &ServiceResult<T>) -> Self {
        match result {
            Ok(_) => Self {
                ok: true,
                message: format!("{action} succeeded"),
                violations: Vec::new(),
            },
            Err(ServiceError::Rejected(violations)) => Self {
                ok: false,
                message: format!("{action} rejected"),
                violations: violations.clone(),
            },
            Err(ServiceError::Storage(_)) => Self {
                ok: false,
                message: format!("{action} failed"),
                violations: Vec::new(),
            },
        }
    }
}
