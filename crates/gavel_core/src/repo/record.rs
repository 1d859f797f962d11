//! Shared persistence contract for validated marketplace records.
//!
//! # Responsibility
//! - Implement the insert/update/delete/find-by-id state machine once,
//!   parameterized by per-record table metadata.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Key preconditions are checked before the store is contacted.
//! - Store failures carry entity and operation context and preserve the
//!   underlying diagnostic.
//! - Rows that fail reconstruction validation surface as errors, never as
//!   silently dropped results.

use crate::model::field::{self, EntityKey, FieldError, RawField};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence-boundary error for record operations.
#[derive(Debug)]
pub enum RepoError {
    /// Insert called on a record whose key is already assigned.
    Conflict { entity: &'static str },
    /// Update/delete called on a record with no assigned key, or a key whose
    /// stored row no longer exists.
    NotFound {
        entity: &'static str,
        operation: &'static str,
    },
    /// Prepare, bind or execute failure at the store boundary.
    Db {
        entity: &'static str,
        operation: &'static str,
        source: rusqlite::Error,
    },
    /// A lookup key or stored row failed field validation at the store
    /// boundary.
    InvalidData {
        entity: &'static str,
        source: FieldError,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conflict { entity } => {
                write!(f, "{entity} already submitted; its key is already assigned")
            }
            Self::NotFound { entity, operation } => {
                write!(f, "unable to {operation} a {entity} that does not exist")
            }
            Self::Db {
                entity,
                operation,
                source,
            } => write!(f, "unable to {operation} {entity}: {source}"),
            Self::InvalidData { entity, source } => {
                write!(f, "invalid {entity} data at the store boundary: {source}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Conflict { .. } | Self::NotFound { .. } => None,
            Self::Db { source, .. } => Some(source),
            Self::InvalidData { source, .. } => Some(source),
        }
    }
}

/// Failure while rebuilding a record from a fetched row.
///
/// Split out so `Record::from_row` implementations can use `?` on both
/// column access and field validation.
#[derive(Debug)]
pub enum RowError {
    Sqlite(rusqlite::Error),
    Field(FieldError),
}

impl RowError {
    fn into_repo(self, entity: &'static str) -> RepoError {
        match self {
            Self::Sqlite(source) => RepoError::Db {
                entity,
                operation: "find_by_id",
                source,
            },
            Self::Field(source) => RepoError::InvalidData { entity, source },
        }
    }
}

impl Display for RowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Field(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RowError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Field(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for RowError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<FieldError> for RowError {
    fn from(value: FieldError) -> Self {
        Self::Field(value)
    }
}

/// A validated record with a primary-key lifecycle and parameterized CRUD.
///
/// Implementations supply table metadata and row mapping; the four
/// persistence operations are provided here so the transient/persisted
/// state machine exists in exactly one place.
pub trait Record: Sized {
    /// Human-readable entity name used in error context.
    const ENTITY: &'static str;
    const TABLE: &'static str;
    const KEY_COLUMN: &'static str;
    /// Non-key columns in fixed bind order.
    const DATA_COLUMNS: &'static [&'static str];

    fn key(&self) -> EntityKey;

    /// Assigns the store-generated key. Called by `insert` exactly once.
    fn assign_key(&mut self, id: i64);

    /// Current non-key field values, store-encoded, in `DATA_COLUMNS` order.
    fn data_values(&self) -> Vec<Value>;

    /// Rebuilds a fully validated record from a fetched row.
    fn from_row(row: &Row<'_>) -> Result<Self, RowError>;

    /// Inserts this record and assigns the generated key.
    ///
    /// Fails with `Conflict` when the record is already persisted; the store
    /// is not contacted in that case.
    fn insert(&mut self, conn: &Connection) -> RepoResult<i64> {
        if let EntityKey::Persisted(_) = self.key() {
            return Err(RepoError::Conflict {
                entity: Self::ENTITY,
            });
        }

        let sql = insert_sql::<Self>();
        let mut stmt = conn
            .prepare(&sql)
            .map_err(db_error(Self::ENTITY, "insert"))?;
        stmt.execute(params_from_iter(self.data_values()))
            .map_err(db_error(Self::ENTITY, "insert"))?;

        let id = conn.last_insert_rowid();
        self.assign_key(id);
        Ok(id)
    }

    /// Rewrites every data column of the stored row keyed by this record.
    ///
    /// Fails with `NotFound` when the record is transient (store not
    /// contacted) or when no stored row matches the key.
    fn update(&self, conn: &Connection) -> RepoResult<()> {
        let Some(id) = self.key().value() else {
            return Err(RepoError::NotFound {
                entity: Self::ENTITY,
                operation: "update",
            });
        };

        let sql = update_sql::<Self>();
        let mut stmt = conn
            .prepare(&sql)
            .map_err(db_error(Self::ENTITY, "update"))?;
        let mut values = self.data_values();
        values.push(Value::Integer(id));
        let changed = stmt
            .execute(params_from_iter(values))
            .map_err(db_error(Self::ENTITY, "update"))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: Self::ENTITY,
                operation: "update",
            });
        }
        Ok(())
    }

    /// Deletes the stored row keyed by this record, consuming the record.
    ///
    /// Taking `self` by value makes the deleted state terminal: the compiler
    /// rejects further operations on a deleted record.
    fn delete(self, conn: &Connection) -> RepoResult<()> {
        let Some(id) = self.key().value() else {
            return Err(RepoError::NotFound {
                entity: Self::ENTITY,
                operation: "delete",
            });
        };

        let sql = format!(
            "DELETE FROM {} WHERE {} = ?1;",
            Self::TABLE,
            Self::KEY_COLUMN
        );
        let mut stmt = conn
            .prepare(&sql)
            .map_err(db_error(Self::ENTITY, "delete"))?;
        let changed = stmt
            .execute([id])
            .map_err(db_error(Self::ENTITY, "delete"))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: Self::ENTITY,
                operation: "delete",
            });
        }
        Ok(())
    }

    /// Fetches one record by key, or `None` when no row matches.
    ///
    /// A key that fails validation is a store-boundary `InvalidData` error
    /// here, not a field error: this entry point never sees user forms.
    fn find_by_id<'a>(
        conn: &Connection,
        raw_key: impl Into<RawField<'a>>,
    ) -> RepoResult<Option<Self>> {
        let key = field::foreign_key(Self::KEY_COLUMN, raw_key.into()).map_err(|source| {
            RepoError::InvalidData {
                entity: Self::ENTITY,
                source,
            }
        })?;

        let sql = select_sql::<Self>();
        let mut stmt = conn
            .prepare(&sql)
            .map_err(db_error(Self::ENTITY, "find_by_id"))?;
        let mut rows = stmt
            .query([key])
            .map_err(db_error(Self::ENTITY, "find_by_id"))?;

        match rows.next().map_err(db_error(Self::ENTITY, "find_by_id"))? {
            Some(row) => Self::from_row(row)
                .map(Some)
                .map_err(|err| err.into_repo(Self::ENTITY)),
            None => Ok(None),
        }
    }
}

fn db_error(
    entity: &'static str,
    operation: &'static str,
) -> impl FnOnce(rusqlite::Error) -> RepoError {
    move |source| RepoError::Db {
        entity,
        operation,
        source,
    }
}

fn insert_sql<R: Record>() -> String {
    let placeholders = (1..=R::DATA_COLUMNS.len())
        .map(|position| format!("?{position}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({});",
        R::TABLE,
        R::DATA_COLUMNS.join(", "),
        placeholders
    )
}

fn update_sql<R: Record>() -> String {
    let assignments = R::DATA_COLUMNS
        .iter()
        .enumerate()
        .map(|(index, column)| format!("{column} = ?{}", index + 1))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {} SET {} WHERE {} = ?{};",
        R::TABLE,
        assignments,
        R::KEY_COLUMN,
        R::DATA_COLUMNS.len() + 1
    )
}

fn select_sql<R: Record>() -> String {
    format!(
        "SELECT {}, {} FROM {} WHERE {} = ?1;",
        R::KEY_COLUMN,
        R::DATA_COLUMNS.join(", "),
        R::TABLE,
        R::KEY_COLUMN
    )
}
