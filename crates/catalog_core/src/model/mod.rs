//! Catalog domain model: restaurants, dishes and menus.
//!
//! # Responsibility
//! - Define the records persisted by the catalog store.
//! - Describe, per record kind, its identity and mutable fields so services
//!   can be written once for every kind.
//!
//! # Invariants
//! - Identity fields are immutable after creation; `apply_patch` never
//!   touches them.
//! - Menu associations (display days, offered dishes) are not fields of
//!   `Menu`; they live in relation tables owned by the menu.

pub mod dish;
pub mod menu;
pub mod restaurant;
pub mod violation;

use violation::Violation;

/// Behavior shared by every catalog record kind.
pub trait CatalogRecord: Clone {
    /// Short lowercase kind name used in log events.
    const KIND: &'static str;
    /// External name of the identity field, as reported in violations.
    const IDENTITY_FIELD: &'static str;

    /// Returns the identity value.
    fn identity(&self) -> &str;

    /// Checks all non-identity field invariants and returns every violation.
    fn validate_fields(&self) -> Vec<Violation>;

    /// Overwrites mutable fields with the values from `patch`.
    ///
    /// The identity of `self` is preserved.
    fn apply_patch(&mut self, patch: &Self);
}
