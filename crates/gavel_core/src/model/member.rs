//! Marketplace member record.
//!
//! # Responsibility
//! - Hold the validated identity of a buying or selling member.
//! - Enforce name and username bounds before any store call.
//!
//! # Invariants
//! - Text fields are trimmed, sanitized, non-empty and at most 25 characters.
//! - `key` is `Transient` until the record is inserted.

use crate::model::field::{self, EntityKey, FieldResult, RawField};
use crate::repo::record::{Record, RowError};
use rusqlite::types::Value;
use rusqlite::Row;
use serde::Serialize;

const NAME_MAX_CHARS: usize = 25;

/// A registered marketplace member.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Member {
    key: EntityKey,
    first_name: String,
    last_name: String,
    user_name: String,
}

impl Member {
    /// Builds a member, validating every field in declaration order.
    ///
    /// The first failing field aborts construction with its `FieldError`.
    pub fn new<'a>(
        key: impl Into<RawField<'a>>,
        first_name: impl Into<RawField<'a>>,
        last_name: impl Into<RawField<'a>>,
        user_name: impl Into<RawField<'a>>,
    ) -> FieldResult<Self> {
        let mut member = Self {
            key: EntityKey::Transient,
            first_name: String::new(),
            last_name: String::new(),
            user_name: String::new(),
        };
        member.set_key(key)?;
        member.set_first_name(first_name)?;
        member.set_last_name(last_name)?;
        member.set_user_name(user_name)?;
        Ok(member)
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// Passing `RawField::Absent` always succeeds and marks the record
    /// transient, which supports building a new copy of persisted data.
    pub fn set_key<'a>(&mut self, raw: impl Into<RawField<'a>>) -> FieldResult<()> {
        self.key = field::entity_key("member id", raw.into())?;
        Ok(())
    }

    pub fn set_first_name<'a>(&mut self, raw: impl Into<RawField<'a>>) -> FieldResult<()> {
        self.first_name = field::bounded_text("first name", raw.into(), NAME_MAX_CHARS)?;
        Ok(())
    }

    pub fn set_last_name<'a>(&mut self, raw: impl Into<RawField<'a>>) -> FieldResult<()> {
        self.last_name = field::bounded_text("last name", raw.into(), NAME_MAX_CHARS)?;
        Ok(())
    }

    pub fn set_user_name<'a>(&mut self, raw: impl Into<RawField<'a>>) -> FieldResult<()> {
        self.user_name = field::bounded_text("username", raw.into(), NAME_MAX_CHARS)?;
        Ok(())
    }
}

impl Record for Member {
    const ENTITY: &'static str = "member";
    const TABLE: &'static str = "members";
    const KEY_COLUMN: &'static str = "member_id";
    const DATA_COLUMNS: &'static [&'static str] = &["first_name", "last_name", "user_name"];

    fn key(&self) -> EntityKey {
        self.key
    }

    fn assign_key(&mut self, id: i64) {
        self.key = EntityKey::Persisted(id);
    }

    fn data_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.first_name.clone()),
            Value::Text(self.last_name.clone()),
            Value::Text(self.user_name.clone()),
        ]
    }

    fn from_row(row: &Row<'_>) -> Result<Self, RowError> {
        let key: i64 = row.get(Self::KEY_COLUMN)?;
        let first_name: String = row.get("first_name")?;
        let last_name: String = row.get("last_name")?;
        let user_name: String = row.get("user_name")?;
        Ok(Self::new(
            key,
            first_name.as_str(),
            last_name.as_str(),
            user_name.as_str(),
        )?)
    }
}
