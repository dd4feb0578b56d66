//! Restaurant record.
//!
//! # Invariants
//! - `tax_id` is unique and immutable once created.
//! - All other fields are mandatory; `mobile` is digits only.

use super::violation::Violation;
use super::CatalogRecord;
use crate::validation;
use serde::{Deserialize, Serialize};

/// A restaurant registered in the catalog.
///
/// Missing fields deserialize as empty strings so that validation can report
/// them instead of failing at decode time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Restaurant {
    /// Tax identification number; the restaurant identity.
    pub tax_id: String,
    pub name: String,
    pub address: String,
    /// Contact phone number, digits only.
    pub mobile: String,
    pub email: String,
    pub city: String,
    /// Username of the restaurant administrator.
    pub admin_username: String,
}

impl CatalogRecord for Restaurant {
    const KIND: &'static str = "restaurant";
    const IDENTITY_FIELD: &'static str = "taxId";

    fn identity(&self) -> &str {
        &self.tax_id
    }

    fn validate_fields(&self) -> Vec<Violation> {
        validation::validate_restaurant(self)
    }

    fn apply_patch(&mut self, patch: &Self) {
        self.name.clone_from(&patch.name);
        self.address.clone_from(&patch.address);
        self.mobile.clone_from(&patch.mobile);
        self.email.clone_from(&patch.email);
        self.city.clone_from(&patch.city);
        self.admin_username.clone_from(&patch.admin_username);
    }
}
