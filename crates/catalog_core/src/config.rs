//! Runtime configuration for catalog hosts.
//!
//! The core never reads the environment on its own; hosts build a
//! `CatalogConfig` (typically via `from_env`) and pass values explicitly to
//! `open_db` and `init_logging`.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "CATALOG_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "CATALOG_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "CATALOG_LOG_DIR";

/// Host-supplied settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Database file. `None` selects an in-memory store.
    pub db_path: Option<PathBuf>,
    /// Log level passed to `init_logging`.
    pub log_level: String,
    /// Absolute log directory. `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CatalogConfig {
    /// Reads settings from `CATALOG_*` environment variables.
    ///
    /// Unset or blank variables fall back to `Default`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        Self {
            db_path: read(DB_PATH_ENV).map(PathBuf::from),
            log_level: read(LOG_LEVEL_ENV).unwrap_or(defaults.log_level),
            log_dir: read(LOG_DIR_ENV).map(PathBuf::from),
        }
    }
}
