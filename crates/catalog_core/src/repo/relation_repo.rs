//! Menu association repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Store `(menu_id, member)` pairs for the display-day and offering
//!   relations.
//! - Provide the cascade primitive used when a menu disappears.
//!
//! # Invariants
//! - A pair is stored at most once (composite primary key).
//! - Members are listed in insertion order.
//! - `erase_all` is all-or-nothing across both relations.

use super::{ensure_schema_version, ensure_table_ready, is_constraint_violation};
use super::{RepoError, RepoResult};
use crate::model::menu::Relation;
use log::debug;
use rusqlite::{params, Connection, Transaction, TransactionBehavior};

const OWNER_COLUMN: &str = "menu_id";

pub(crate) fn relation_table(relation: Relation) -> &'static str {
    match relation {
        Relation::DisplayDays => "menu_display_days",
        Relation::Offerings => "menu_offerings",
    }
}

fn member_column(relation: Relation) -> &'static str {
    match relation {
        Relation::DisplayDays => "day",
        Relation::Offerings => "dish_id",
    }
}

fn pair_kind(relation: Relation) -> &'static str {
    match relation {
        Relation::DisplayDays => "menu display day",
        Relation::Offerings => "menu offering",
    }
}

/// Deletes every pair of `relation` owned by `menu_id` inside `tx`.
///
/// Returns the number of removed pairs.
pub(crate) fn erase_members_in_tx(
    tx: &Transaction<'_>,
    relation: Relation,
    menu_id: &str,
) -> RepoResult<usize> {
    let removed = tx.execute(
        &format!(
            "DELETE FROM {} WHERE {OWNER_COLUMN} = ?1;",
            relation_table(relation)
        ),
        [menu_id],
    )?;
    debug!(
        "event=relation_erase module=repo relation={} menu_id={menu_id} removed={removed}",
        relation.label()
    );
    Ok(removed)
}

/// Repository interface for menu association pairs.
pub trait RelationRepository {
    /// Stores one pair; fails with `Conflict` when it already exists.
    fn insert_pair(&self, relation: Relation, menu_id: &str, member: &str) -> RepoResult<()>;
    /// Removes one pair; fails with `NotFound` when it does not exist.
    fn delete_pair(&self, relation: Relation, menu_id: &str, member: &str) -> RepoResult<()>;
    /// Lists members of one menu in insertion order.
    fn list_members(&self, relation: Relation, menu_id: &str) -> RepoResult<Vec<String>>;
    /// Keyed existence check for one pair.
    fn pair_exists(&self, relation: Relation, menu_id: &str, member: &str) -> RepoResult<bool>;
    /// Removes every pair of every relation owned by `menu_id` atomically.
    fn erase_all(&self, menu_id: &str) -> RepoResult<usize>;
}

/// SQLite-backed association repository.
pub struct SqliteRelationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRelationRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_version(conn)?;
        for relation in Relation::ALL {
            ensure_table_ready(
                conn,
                relation_table(relation),
                &[OWNER_COLUMN, member_column(relation)],
            )?;
        }
        Ok(Self { conn })
    }
}

impl RelationRepository for SqliteRelationRepository<'_> {
    fn insert_pair(&self, relation: Relation, menu_id: &str, member: &str) -> RepoResult<()> {
        let sql = format!(
            "INSERT INTO {} ({OWNER_COLUMN}, {}) VALUES (?1, ?2);",
            relation_table(relation),
            member_column(relation)
        );

        match self.conn.execute(&sql, params![menu_id, member]) {
            Ok(_) => Ok(()),
            Err(err) if is_constraint_violation(&err) => Err(RepoError::Conflict {
                kind: pair_kind(relation),
                id: format!("{menu_id}/{member}"),
            }),
            Err(err) => Err(err.into()),
        }
    }

    fn delete_pair(&self, relation: Relation, menu_id: &str, member: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            &format!(
                "DELETE FROM {} WHERE {OWNER_COLUMN} = ?1 AND {} = ?2;",
                relation_table(relation),
                member_column(relation)
            ),
            params![menu_id, member],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: pair_kind(relation),
                id: format!("{menu_id}/{member}"),
            });
        }

        Ok(())
    }

    fn list_members(&self, relation: Relation, menu_id: &str) -> RepoResult<Vec<String>> {
        let member = member_column(relation);
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {member} FROM {} WHERE {OWNER_COLUMN} = ?1 ORDER BY rowid ASC;",
            relation_table(relation)
        ))?;
        let mut rows = stmt.query([menu_id])?;
        let mut members = Vec::new();
        while let Some(row) = rows.next()? {
            members.push(row.get(0)?);
        }
        Ok(members)
    }

    fn pair_exists(&self, relation: Relation, menu_id: &str, member: &str) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            &format!(
                "SELECT EXISTS(
                    SELECT 1 FROM {} WHERE {OWNER_COLUMN} = ?1 AND {} = ?2
                );",
                relation_table(relation),
                member_column(relation)
            ),
            params![menu_id, member],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn erase_all(&self, menu_id: &str) -> RepoResult<usize> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let mut removed = 0;
        for relation in Relation::ALL {
            removed += erase_members_in_tx(&tx, relation, menu_id)?;
        }
        tx.commit()?;
        Ok(removed)
    }
}
