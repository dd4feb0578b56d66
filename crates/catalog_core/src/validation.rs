//! Field-level validation for catalog records.
//!
//! # Responsibility
//! - Check required and format invariants of a single record.
//! - Report every violation found; checks never stop at the first failure.
//!
//! # Invariants
//! - Pure functions: no I/O, deterministic output order.
//! - Cross-record checks (duplicates, missing references) belong to services.

use crate::model::dish::Dish;
use crate::model::menu::{Menu, Relation};
use crate::model::restaurant::Restaurant;
use crate::model::violation::Violation;
use once_cell::sync::Lazy;
use regex::Regex;

static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid digits regex"));

/// Returns whether a value is empty after trimming whitespace.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Pushes an `EMPTY_FIELD` violation when `value` is blank.
pub fn check_required(
    violations: &mut Vec<Violation>,
    field: &str,
    value: &str,
    description: &str,
) {
    if is_blank(value) {
        violations.push(Violation::empty_field(field, description));
    }
}

/// Pushes an `INVALID_FIELD` violation when a non-blank `value` contains
/// anything other than ASCII digits.
///
/// Blank values are left to `check_required`.
pub fn check_digits(violations: &mut Vec<Violation>, field: &str, value: &str, description: &str) {
    if !is_blank(value) && !DIGITS_RE.is_match(value) {
        violations.push(Violation::invalid_field(field, description));
    }
}

pub fn validate_restaurant(restaurant: &Restaurant) -> Vec<Violation> {
    let mut violations = Vec::new();
    check_required(
        &mut violations,
        "name",
        &restaurant.name,
        "restaurant name is required",
    );
    check_required(
        &mut violations,
        "address",
        &restaurant.address,
        "restaurant address is required",
    );
    check_required(
        &mut violations,
        "mobile",
        &restaurant.mobile,
        "restaurant phone number is required",
    );
    check_required(
        &mut violations,
        "email",
        &restaurant.email,
        "restaurant email is required",
    );
    check_required(
        &mut violations,
        "city",
        &restaurant.city,
        "restaurant city is required",
    );
    check_required(
        &mut violations,
        "adminUsername",
        &restaurant.admin_username,
        "restaurant administrator username is required",
    );
    check_digits(
        &mut violations,
        "mobile",
        &restaurant.mobile,
        "restaurant phone number must contain digits only",
    );
    violations
}

pub fn validate_dish(dish: &Dish) -> Vec<Violation> {
    let mut violations = Vec::new();
    check_required(&mut violations, "name", &dish.name, "dish name is required");
    check_required(&mut violations, "price", &dish.price, "dish price is required");
    check_required(
        &mut violations,
        "category",
        &dish.category,
        "dish category is required",
    );
    check_required(
        &mut violations,
        "description",
        &dish.description,
        "dish description is required",
    );
    check_required(
        &mut violations,
        "dishType",
        &dish.dish_type,
        "dish type is required",
    );
    violations
}

pub fn validate_menu(menu: &Menu) -> Vec<Violation> {
    let mut violations = Vec::new();
    check_required(
        &mut violations,
        "restaurantTaxId",
        &menu.restaurant_tax_id,
        "menu restaurant tax id is required",
    );
    check_required(&mut violations, "name", &menu.name, "menu name is required");
    violations
}

/// Checks the two halves of a menu association pair.
pub fn validate_pair(relation: Relation, menu_id: &str, member: &str) -> Vec<Violation> {
    let mut violations = Vec::new();
    check_required(&mut violations, "menuId", menu_id, "menu id is required");
    let description = match relation {
        Relation::DisplayDays => "display day is required",
        Relation::Offerings => "dish id is required",
    };
    check_required(&mut violations, relation.member_field(), member, description);
    violations
}

#[cfg(test)]
mod tests {
    use super::{is_blank, validate_dish, validate_menu, validate_pair, validate_restaurant};
    use crate::model::dish::Dish;
    use crate::model::menu::{Menu, Relation};
    use crate::model::restaurant::Restaurant;
    use crate::model::violation::ViolationKind;

    fn restaurant() -> Restaurant {
        Restaurant {
            tax_id: "111".to_string(),
            name: "Cosecha".to_string(),
            address: "Norte".to_string(),
            mobile: "8212341".to_string(),
            email: "a@b.com".to_string(),
            city: "Popayan".to_string(),
            admin_username: "mfg".to_string(),
        }
    }

    #[test]
    fn valid_restaurant_has_no_violations() {
        assert!(validate_restaurant(&restaurant()).is_empty());
    }

    #[test]
    fn blank_counts_as_empty() {
        assert!(is_blank(""));
        assert!(is_blank("  \t"));
        assert!(!is_blank(" x "));
    }

    #[test]
    fn restaurant_reports_every_empty_field() {
        let violations = validate_restaurant(&Restaurant::default());
        let fields: Vec<_> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(
            fields,
            ["name", "address", "mobile", "email", "city", "adminUsername"]
        );
        assert!(violations
            .iter()
            .all(|v| v.kind == ViolationKind::EmptyField));
    }

    #[test]
    fn non_numeric_mobile_is_invalid() {
        let mut candidate = restaurant();
        candidate.mobile = "82-1234".to_string();
        candidate.city = String::new();

        let violations = validate_restaurant(&candidate);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].field, "city");
        assert_eq!(violations[1].field, "mobile");
        assert_eq!(violations[1].kind, ViolationKind::InvalidField);
    }

    #[test]
    fn dish_and_menu_require_all_mutable_fields() {
        assert_eq!(validate_dish(&Dish::default()).len(), 5);

        let menu = Menu {
            id: "100".to_string(),
            name: " ".to_string(),
            restaurant_tax_id: "500".to_string(),
        };
        let violations = validate_menu(&menu);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "name");
    }

    #[test]
    fn pair_validation_names_relation_member() {
        let violations = validate_pair(Relation::Offerings, "", "");
        let fields: Vec<_> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, ["menuId", "dishId"]);
    }
}
