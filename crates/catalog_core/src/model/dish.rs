//! Dish record.

use super::violation::Violation;
use super::CatalogRecord;
use crate::validation;
use serde::{Deserialize, Serialize};

/// A dish that menus can offer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dish {
    pub id: String,
    pub name: String,
    /// Price as entered by the restaurant; stored verbatim.
    pub price: String,
    pub category: String,
    pub description: String,
    pub dish_type: String,
}

impl CatalogRecord for Dish {
    const KIND: &'static str = "dish";
    const IDENTITY_FIELD: &'static str = "id";

    fn identity(&self) -> &str {
        &self.id
    }

    fn validate_fields(&self) -> Vec<Violation> {
        validation::validate_dish(self)
    }

    fn apply_patch(&mut self, patch: &Self) {
        self.name.clone_from(&patch.name);
        self.price.clone_from(&patch.price);
        self.category.clone_from(&patch.category);
        self.description.clone_from(&patch.description);
        self.dish_type.clone_from(&patch.dish_type);
    }
}
