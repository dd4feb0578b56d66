//! Keyed record repository contracts and a generic SQLite implementation.
//!
//! # Responsibility
//! - Provide point reads, listing and single-row mutations for every
//!   catalog record kind through one implementation.
//! - Remove owned association rows together with their parent row.
//!
//! # Invariants
//! - `delete` of a record with owned relations is one transaction: either
//!   the parent row and all of its association rows disappear, or nothing
//!   changes.
//! - Primary-key collisions surface as `RepoError::Conflict`, never as a
//!   raw SQLite error.

use super::relation_repo::{erase_members_in_tx, relation_table};
use super::{ensure_schema_version, ensure_table_ready, is_constraint_violation};
use super::{RepoError, RepoResult};
use crate::model::dish::Dish;
use crate::model::menu::{Menu, Relation};
use crate::model::restaurant::Restaurant;
use crate::model::CatalogRecord;
use log::debug;
use rusqlite::types::Value;
use rusqlite::{
    params_from_iter, Connection, OptionalExtension, Row, Transaction, TransactionBehavior,
};
use std::marker::PhantomData;

/// Repository interface shared by all catalog record kinds.
pub trait RecordRepository<E: CatalogRecord> {
    /// Point read by identity.
    fn find(&self, id: &str) -> RepoResult<Option<E>>;
    /// Existence oracle; a miss is `Ok(false)`, never an error.
    fn exists(&self, id: &str) -> RepoResult<bool> {
        Ok(self.find(id)?.is_some())
    }
    /// Lists all records ordered by identity.
    fn find_all(&self) -> RepoResult<Vec<E>>;
    /// Inserts a new record.
    fn insert(&self, record: &E) -> RepoResult<()>;
    /// Replaces every non-identity column of an existing record.
    fn update(&self, record: &E) -> RepoResult<()>;
    /// Deletes a record together with the rows it owns.
    fn delete(&self, id: &str) -> RepoResult<()>;
}

/// Secondary-key reads for restaurants.
pub trait RestaurantLookup {
    /// Returns the first restaurant with exactly this name.
    fn find_by_name(&self, name: &str) -> RepoResult<Option<Restaurant>>;
    /// Returns every restaurant managed by one administrator.
    fn find_by_admin(&self, admin_username: &str) -> RepoResult<Vec<Restaurant>>;
}

/// Secondary-key reads for menus.
pub trait MenuLookup {
    /// Returns every menu that references the given restaurant.
    fn find_by_restaurant(&self, restaurant_tax_id: &str) -> RepoResult<Vec<Menu>>;
}

/// Table mapping for a record kind.
pub trait SqlRecord: CatalogRecord + Sized {
    const TABLE: &'static str;
    const KEY_COLUMN: &'static str;
    /// All columns in bind order, starting with `KEY_COLUMN`.
    const COLUMNS: &'static [&'static str];
    /// Relations whose rows are erased together with the record.
    const OWNED_RELATIONS: &'static [Relation] = &[];

    /// Values for `COLUMNS`, in the same order.
    fn bind_values(&self) -> Vec<Value>;
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

impl SqlRecord for Restaurant {
    const TABLE: &'static str = "restaurants";
    const KEY_COLUMN: &'static str = "tax_id";
    const COLUMNS: &'static [&'static str] = &[
        "tax_id",
        "name",
        "address",
        "mobile",
        "email",
        "city",
        "admin_username",
    ];

    fn bind_values(&self) -> Vec<Value> {
        text_values([
            &self.tax_id,
            &self.name,
            &self.address,
            &self.mobile,
            &self.email,
            &self.city,
            &self.admin_username,
        ])
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            tax_id: row.get("tax_id")?,
            name: row.get("name")?,
            address: row.get("address")?,
            mobile: row.get("mobile")?,
            email: row.get("email")?,
            city: row.get("city")?,
            admin_username: row.get("admin_username")?,
        })
    }
}

impl SqlRecord for Dish {
    const TABLE: &'static str = "dishes";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "price",
        "category",
        "description",
        "dish_type",
    ];

    fn bind_values(&self) -> Vec<Value> {
        text_values([
            &self.id,
            &self.name,
            &self.price,
            &self.category,
            &self.description,
            &self.dish_type,
        ])
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            price: row.get("price")?,
            category: row.get("category")?,
            description: row.get("description")?,
            dish_type: row.get("dish_type")?,
        })
    }
}

impl SqlRecord for Menu {
    const TABLE: &'static str = "menus";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &["id", "name", "restaurant_tax_id"];
    const OWNED_RELATIONS: &'static [Relation] = &Relation::ALL;

    fn bind_values(&self) -> Vec<Value> {
        text_values([&self.id, &self.name, &self.restaurant_tax_id])
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            restaurant_tax_id: row.get("restaurant_tax_id")?,
        })
    }
}

/// SQLite-backed repository for one record kind.
pub struct SqliteRecordRepository<'conn, E> {
    conn: &'conn Connection,
    _record: PhantomData<E>,
}

impl<'conn, E: SqlRecord> SqliteRecordRepository<'conn, E> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_version(conn)?;
        ensure_table_ready(conn, E::TABLE, E::COLUMNS)?;
        for relation in E::OWNED_RELATIONS {
            ensure_table_ready(conn, relation_table(*relation), &[])?;
        }
        Ok(Self {
            conn,
            _record: PhantomData,
        })
    }

    fn select_sql() -> String {
        format!("SELECT {} FROM {}", E::COLUMNS.join(", "), E::TABLE)
    }

    fn select_where(&self, column: &str, value: &str) -> RepoResult<Vec<E>> {
        let mut stmt = self.conn.prepare(&format!(
            "{} WHERE {column} = ?1 ORDER BY {} ASC;",
            Self::select_sql(),
            E::KEY_COLUMN
        ))?;
        let mut rows = stmt.query([value])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(E::from_row(row)?);
        }
        Ok(records)
    }
}

impl<E: SqlRecord> RecordRepository<E> for SqliteRecordRepository<'_, E> {
    fn find(&self, id: &str) -> RepoResult<Option<E>> {
        let record = self
            .conn
            .query_row(
                &format!("{} WHERE {} = ?1;", Self::select_sql(), E::KEY_COLUMN),
                [id],
                |row| E::from_row(row),
            )
            .optional()?;
        Ok(record)
    }

    fn exists(&self, id: &str) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            &format!(
                "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = ?1);",
                E::TABLE,
                E::KEY_COLUMN
            ),
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn find_all(&self) -> RepoResult<Vec<E>> {
        let mut stmt = self.conn.prepare(&format!(
            "{} ORDER BY {} ASC;",
            Self::select_sql(),
            E::KEY_COLUMN
        ))?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(E::from_row(row)?);
        }
        Ok(records)
    }

    fn insert(&self, record: &E) -> RepoResult<()> {
        let placeholders = (1..=E::COLUMNS.len())
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({placeholders});",
            E::TABLE,
            E::COLUMNS.join(", ")
        );

        match self.conn.execute(&sql, params_from_iter(record.bind_values())) {
            Ok(_) => Ok(()),
            Err(err) if is_constraint_violation(&err) => Err(RepoError::Conflict {
                kind: E::KIND,
                id: record.identity().to_string(),
            }),
            Err(err) => Err(err.into()),
        }
    }

    fn update(&self, record: &E) -> RepoResult<()> {
        let assignments = E::COLUMNS
            .iter()
            .enumerate()
            .skip(1)
            .map(|(index, column)| format!("{column} = ?{}", index + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let changed = self.conn.execute(
            &format!(
                "UPDATE {} SET {assignments} WHERE {} = ?1;",
                E::TABLE,
                E::KEY_COLUMN
            ),
            params_from_iter(record.bind_values()),
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: E::KIND,
                id: record.identity().to_string(),
            });
        }

        Ok(())
    }

    fn delete(&self, id: &str) -> RepoResult<()> {
        // Dropping `tx` on an early return rolls back any erased relation rows.
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let mut erased = 0;
        for relation in E::OWNED_RELATIONS {
            erased += erase_members_in_tx(&tx, *relation, id)?;
        }

        let changed = tx.execute(
            &format!("DELETE FROM {} WHERE {} = ?1;", E::TABLE, E::KEY_COLUMN),
            [id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: E::KIND,
                id: id.to_string(),
            });
        }

        tx.commit()?;
        debug!(
            "event=record_delete module=repo kind={} id={id} erased_relations={erased}",
            E::KIND
        );
        Ok(())
    }
}

impl RestaurantLookup for SqliteRecordRepository<'_, Restaurant> {
    fn find_by_name(&self, name: &str) -> RepoResult<Option<Restaurant>> {
        Ok(self.select_where("name", name)?.into_iter().next())
    }

    fn find_by_admin(&self, admin_username: &str) -> RepoResult<Vec<Restaurant>> {
        self.select_where("admin_username", admin_username)
    }
}

impl MenuLookup for SqliteRecordRepository<'_, Menu> {
    fn find_by_restaurant(&self, restaurant_tax_id: &str) -> RepoResult<Vec<Menu>> {
        self.select_where("restaurant_tax_id", restaurant_tax_id)
    }
}

fn text_values<const N: usize>(values: [&String; N]) -> Vec<Value> {
    values
        .into_iter()
        .map(|value| Value::Text(value.clone()))
        .collect()
}
