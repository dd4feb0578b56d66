//! Generic create/update/delete orchestration for catalog records.
//!
//! # Responsibility
//! - Run field validation and existence checks before any mutation.
//! - Report every violation of one operation together.
//!
//! # Invariants
//! - Identity is mandatory and unique on create, immutable on update.
//! - Update persists `current + patch`, never the raw patch.
//! - Deleting a menu removes its association rows in the same transaction
//!   (see `SqlRecord::OWNED_RELATIONS`).

use super::{ServiceError, ServiceResult};
use crate::model::dish::Dish;
use crate::model::menu::Menu;
use crate::model::restaurant::Restaurant;
use crate::model::violation::Violation;
use crate::model::CatalogRecord;
use crate::repo::record_repo::{MenuLookup, RecordRepository, RestaurantLookup};
use crate::repo::{RepoError, RepoResult};
use crate::validation::{check_required, is_blank};
use log::{error, info, warn};
use std::marker::PhantomData;

pub type RestaurantService<R> = RecordService<Restaurant, R>;
pub type DishService<R> = RecordService<Dish, R>;
pub type MenuService<R> = RecordService<Menu, R>;

/// Use-case service for one record kind.
pub struct RecordService<E, R> {
    repo: R,
    _record: PhantomData<E>,
}

impl<E: CatalogRecord, R: RecordRepository<E>> RecordService<E, R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            _record: PhantomData,
        }
    }

    /// Gets one record by identity.
    pub fn find(&self, id: &str) -> RepoResult<Option<E>> {
        self.repo.find(id)
    }

    /// Lists all records ordered by identity.
    pub fn find_all(&self) -> RepoResult<Vec<E>> {
        self.repo.find_all()
    }

    /// Returns whether a record with this identity exists.
    pub fn exists(&self, id: &str) -> RepoResult<bool> {
        self.repo.exists(id)
    }

    /// Validates and inserts a new record.
    ///
    /// # Errors
    /// - `Rejected` when a field is blank or malformed, or the identity is
    ///   already taken.
    /// - `Storage` when persistence fails.
    pub fn create(&self, candidate: &E) -> ServiceResult<()> {
        let id = candidate.identity();
        let mut violations = Vec::new();
        check_required(
            &mut violations,
            E::IDENTITY_FIELD,
            id,
            &format!("{} identity is required", E::KIND),
        );
        violations.extend(candidate.validate_fields());
        if !is_blank(id) && self.repo.exists(id)? {
            violations.push(duplicate_identity::<E>(id));
        }
        self.reject_if_any("record_create", id, violations)?;

        match self.repo.insert(candidate) {
            Ok(()) => {
                info!(
                    "event=record_create module=service status=ok kind={} id={id}",
                    E::KIND
                );
                Ok(())
            }
            Err(RepoError::Conflict { .. }) => {
                self.reject_if_any("record_create", id, vec![duplicate_identity::<E>(id)])
            }
            Err(err) => Err(self.storage_failure("record_create", id, err)),
        }
    }

    /// Overlays the mutable fields of `patch` onto the stored record `id`.
    ///
    /// The identity carried by `patch` is ignored. Returns the merged record.
    ///
    /// # Errors
    /// - `Rejected` when a patch field is invalid or `id` does not exist,
    ///   including when the record disappears between check and write.
    /// - `Storage` when persistence fails.
    pub fn update(&self, id: &str, patch: &E) -> ServiceResult<E> {
        let mut violations = patch.validate_fields();
        if !self.repo.exists(id)? {
            violations.push(missing_identity::<E>(id));
        }
        self.reject_if_any("record_update", id, violations)?;

        let Some(mut current) = self.repo.find(id)? else {
            return Err(self.vanished("record_update", id));
        };
        current.apply_patch(patch);

        match self.repo.update(&current) {
            Ok(()) => {
                info!(
                    "event=record_update module=service status=ok kind={} id={id}",
                    E::KIND
                );
                Ok(current)
            }
            Err(RepoError::NotFound { .. }) => Err(self.vanished("record_update", id)),
            Err(err) => Err(self.storage_failure("record_update", id, err)),
        }
    }

    /// Deletes record `id` and every association row it owns.
    ///
    /// # Errors
    /// - `Rejected` when `id` does not exist.
    /// - `Storage` when persistence fails; the store is left unchanged.
    pub fn delete(&self, id: &str) -> ServiceResult<()> {
        if !self.repo.exists(id)? {
            self.reject_if_any("record_delete", id, vec![missing_identity::<E>(id)])?;
        }

        match self.repo.delete(id) {
            Ok(()) => {
                info!(
                    "event=record_delete module=service status=ok kind={} id={id}",
                    E::KIND
                );
                Ok(())
            }
            Err(RepoError::NotFound { .. }) => Err(self.vanished("record_delete", id)),
            Err(err) => Err(self.storage_failure("record_delete", id, err)),
        }
    }

    fn reject_if_any(
        &self,
        event: &str,
        id: &str,
        violations: Vec<Violation>,
    ) -> ServiceResult<()> {
        if violations.is_empty() {
            return Ok(());
        }
        warn!(
            "event={event} module=service status=rejected kind={} id={id} violations={}",
            E::KIND,
            violations.len()
        );
        Err(ServiceError::Rejected(violations))
    }

    fn vanished(&self, event: &str, id: &str) -> ServiceError {
        warn!(
            "event={event} module=service status=rejected kind={} id={id} error_code=record_vanished",
            E::KIND
        );
        ServiceError::Rejected(vec![missing_identity::<E>(id)])
    }

    fn storage_failure(&self, event: &str, id: &str, err: RepoError) -> ServiceError {
        error!(
            "event={event} module=service status=error kind={} id={id} error={err}",
            E::KIND
        );
        ServiceError::Storage(err)
    }
}

impl<R: RecordRepository<Restaurant> + RestaurantLookup> RecordService<Restaurant, R> {
    /// Gets the first restaurant with exactly this name.
    pub fn find_by_name(&self, name: &str) -> RepoResult<Option<Restaurant>> {
        self.repo.find_by_name(name)
    }

    /// Lists restaurants managed by one administrator.
    pub fn find_by_admin(&self, admin_username: &str) -> RepoResult<Vec<Restaurant>> {
        self.repo.find_by_admin(admin_username)
    }
}

impl<R: RecordRepository<Menu> + MenuLookup> RecordService<Menu, R> {
    /// Lists menus published by one restaurant.
    pub fn find_by_restaurant(&self, restaurant_tax_id: &str) -> RepoResult<Vec<Menu>> {
        self.repo.find_by_restaurant(restaurant_tax_id)
    }
}

fn duplicate_identity<E: CatalogRecord>(id: &str) -> Violation {
    Violation::invalid_field(E::IDENTITY_FIELD, format!("{} `{id}` already exists", E::KIND))
}

fn missing_identity<E: CatalogRecord>(id: &str) -> Violation {
    Violation::invalid_field(E::IDENTITY_FIELD, format!("{} `{id}` does not exist", E::KIND))
}
