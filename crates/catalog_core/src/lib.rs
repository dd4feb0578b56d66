//! Core business rules for the restaurant catalog.
//! This crate is the single source of truth for validation and referential
//! integrity of restaurants, dishes, menus and menu associations.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validation;

pub use config::CatalogConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::dish::Dish;
pub use model::menu::{Menu, Relation};
pub use model::restaurant::Restaurant;
pub use model::violation::{Violation, ViolationKind};
pub use model::CatalogRecord;
pub use repo::record_repo::{
    MenuLookup, RecordRepository, RestaurantLookup, SqlRecord, SqliteRecordRepository,
};
pub use repo::relation_repo::{RelationRepository, SqliteRelationRepository};
pub use repo::{RepoError, RepoResult};
pub use service::record_service::{DishService, MenuService, RecordService, RestaurantService};
pub use service::relation_service::RelationManager;
pub use service::{OperationReport, ServiceError, ServiceResult};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
