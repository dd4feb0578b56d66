//! Menu association use-cases (display days, offered dishes).
//!
//! # Responsibility
//! - Guard association writes with menu existence and pair uniqueness.
//! - Expose the cascade that erases every association of one menu.
//!
//! # Invariants
//! - No pair is ever written for a menu that does not exist.
//! - A pair is added at most once and removed only when present.
//! - `cascade_erase_all` is all-or-nothing across both relations.

use super::{ServiceError, ServiceResult};
use crate::model::menu::{Menu, Relation};
use crate::model::violation::Violation;
use crate::repo::record_repo::RecordRepository;
use crate::repo::relation_repo::RelationRepository;
use crate::repo::{RepoError, RepoResult};
use crate::validation::{check_required, is_blank, validate_pair};
use log::{error, info, warn};

/// Association manager over a menu store and a relation store.
pub struct RelationManager<M, R> {
    menus: M,
    relations: R,
}

impl<M: RecordRepository<Menu>, R: RelationRepository> RelationManager<M, R> {
    pub fn new(menus: M, relations: R) -> Self {
        Self { menus, relations }
    }

    /// Associates `member` with menu `menu_id`.
    ///
    /// # Errors
    /// - `Rejected` when an input is blank, the menu does not exist, or the
    ///   pair is already present.
    pub fn add_member(&self, relation: Relation, menu_id: &str, member: &str) -> ServiceResult<()> {
        let mut violations = validate_pair(relation, menu_id, member);
        if !is_blank(menu_id) && !self.menus.exists(menu_id)? {
            violations.push(Violation::invalid_field(
                "menuId",
                format!("menu `{menu_id}` does not exist"),
            ));
        }
        if !is_blank(menu_id)
            && !is_blank(member)
            && self.relations.pair_exists(relation, menu_id, member)?
        {
            violations.push(duplicate_pair(relation, menu_id, member));
        }
        reject_if_any("relation_add", relation, menu_id, violations)?;

        match self.relations.insert_pair(relation, menu_id, member) {
            Ok(()) => {
                info!(
                    "event=relation_add module=service status=ok relation={} menu_id={menu_id}",
                    relation.label()
                );
                Ok(())
            }
            Err(RepoError::Conflict { .. }) => reject_if_any(
                "relation_add",
                relation,
                menu_id,
                vec![duplicate_pair(relation, menu_id, member)],
            ),
            Err(err) => Err(storage_failure("relation_add", relation, menu_id, err)),
        }
    }

    /// Removes the association between `member` and menu `menu_id`.
    ///
    /// # Errors
    /// - `Rejected` when an input is blank or the pair is not present.
    pub fn remove_member(
        &self,
        relation: Relation,
        menu_id: &str,
        member: &str,
    ) -> ServiceResult<()> {
        let mut violations = validate_pair(relation, menu_id, member);
        if violations.is_empty() && !self.relations.pair_exists(relation, menu_id, member)? {
            violations.push(missing_pair(relation, menu_id, member));
        }
        reject_if_any("relation_remove", relation, menu_id, violations)?;

        match self.relations.delete_pair(relation, menu_id, member) {
            Ok(()) => {
                info!(
                    "event=relation_remove module=service status=ok relation={} menu_id={menu_id}",
                    relation.label()
                );
                Ok(())
            }
            Err(RepoError::NotFound { .. }) => reject_if_any(
                "relation_remove",
                relation,
                menu_id,
                vec![missing_pair(relation, menu_id, member)],
            ),
            Err(err) => Err(storage_failure("relation_remove", relation, menu_id, err)),
        }
    }

    /// Lists members of one menu in insertion order; empty when none.
    pub fn list_members(&self, relation: Relation, menu_id: &str) -> RepoResult<Vec<String>> {
        self.relations.list_members(relation, menu_id)
    }

    /// Erases every association of menu `menu_id` in one transaction.
    ///
    /// Returns the number of removed pairs. The menu row itself is untouched.
    pub fn cascade_erase_all(&self, menu_id: &str) -> ServiceResult<usize> {
        let mut violations = Vec::new();
        check_required(&mut violations, "menuId", menu_id, "menu id is required");
        if !violations.is_empty() {
            return Err(ServiceError::Rejected(violations));
        }

        match self.relations.erase_all(menu_id) {
            Ok(removed) => {
                info!(
                    "event=relation_erase module=service status=ok menu_id={menu_id} removed={removed}"
                );
                Ok(removed)
            }
            Err(err) => {
                error!(
                    "event=relation_erase module=service status=error menu_id={menu_id} error={err}"
                );
                Err(ServiceError::Storage(err))
            }
        }
    }
}

fn duplicate_pair(relation: Relation, menu_id: &str, member: &str) -> Violation {
    Violation::invalid_field(
        relation.member_field(),
        format!("`{member}` is already associated with menu `{menu_id}`"),
    )
}

fn missing_pair(relation: Relation, menu_id: &str, member: &str) -> Violation {
    Violation::invalid_field(
        relation.member_field(),
        format!("`{member}` is not associated with menu `{menu_id}`"),
    )
}

fn reject_if_any(
    event: &str,
    relation: Relation,
    menu_id: &str,
    violations: Vec<Violation>,
) -> ServiceResult<()> {
    if violations.is_empty() {
        return Ok(());
    }
    warn!(
        "event={event} module=service status=rejected relation={} menu_id={menu_id} violations={}",
        relation.label(),
        violations.len()
    );
    Err(ServiceError::Rejected(violations))
}

fn storage_failure(event: &str, relation: Relation, menu_id: &str, err: RepoError) -> ServiceError {
    error!(
        "event={event} module=service status=error relation={} menu_id={menu_id} error={err}",
        relation.label()
    );
    ServiceError::Storage(err)
}
