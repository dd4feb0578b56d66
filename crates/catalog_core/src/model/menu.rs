//! Menu record and its association kinds.
//!
//! # Invariants
//! - `restaurant_tax_id` is a soft reference; the store does not enforce it.
//! - Display days and offered dishes are stored in relation tables keyed by
//!   `(menu_id, member)` and must never outlive the menu.

use super::violation::Violation;
use super::CatalogRecord;
use crate::validation;
use serde::{Deserialize, Serialize};

/// A named menu published by a restaurant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Menu {
    pub id: String,
    pub name: String,
    /// Tax id of the owning restaurant.
    pub restaurant_tax_id: String,
}

impl CatalogRecord for Menu {
    const KIND: &'static str = "menu";
    const IDENTITY_FIELD: &'static str = "id";

    fn identity(&self) -> &str {
        &self.id
    }

    fn validate_fields(&self) -> Vec<Violation> {
        validation::validate_menu(self)
    }

    fn apply_patch(&mut self, patch: &Self) {
        self.name.clone_from(&patch.name);
        self.restaurant_tax_id.clone_from(&patch.restaurant_tax_id);
    }
}

/// Many-to-many relation owned by a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// Weekdays on which the menu is shown.
    DisplayDays,
    /// Dishes the menu offers.
    Offerings,
}

impl Relation {
    /// Every relation a menu owns, in cascade order.
    pub const ALL: [Relation; 2] = [Relation::DisplayDays, Relation::Offerings];

    /// External name of the member field, as reported in violations.
    pub fn member_field(self) -> &'static str {
        match self {
            Self::DisplayDays => "day",
            Self::Offerings => "dishId",
        }
    }

    /// Short name used in log events.
    pub fn label(self) -> &'static str {
        match self {
            Self::DisplayDays => "display_days",
            Self::Offerings => "offerings",
        }
    }
}
