//! Catalog store bootstrap: connection setup and versioned schema.
//!
//! Every connection handed out by [`open_db`] or [`open_db_in_memory`] has
//! the restaurant, dish, menu and menu-association tables in place. The
//! schema version lives in `PRAGMA user_version`; a store written by a newer
//! build is refused instead of being downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failures while opening or migrating the catalog store.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The migration script for `version` failed; nothing from the batch
    /// was committed.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// The store carries a schema version this build does not know.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "catalog store error: {err}"),
            Self::Migration { version, source } => {
                write!(f, "catalog migration v{version} failed: {source}")
            }
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "catalog schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Migration { source: err, .. } => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
