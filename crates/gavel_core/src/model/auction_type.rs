//! Auction type lookup record.
//!
//! A tiny reference table; the description is a short code such as
//! "standard" or "reserve", hence the 10-character bound.

use crate::model::field::{self, EntityKey, FieldResult, RawField};
use crate::repo::record::{Record, RowError};
use rusqlite::types::Value;
use rusqlite::Row;
use serde::Serialize;

const DESC_MAX_CHARS: usize = 10;

/// The kind of auction a listing runs under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuctionType {
    key: EntityKey,
    auction_type_desc: String,
}

impl AuctionType {
    pub fn new<'a>(
        key: impl Into<RawField<'a>>,
        auction_type_desc: impl Into<RawField<'a>>,
    ) -> FieldResult<Self> {
        let mut auction_type = Self {
            key: EntityKey::Transient,
            auction_type_desc: String::new(),
        };
        auction_type.set_key(key)?;
        auction_type.set_auction_type_desc(auction_type_desc)?;
        Ok(auction_type)
    }

    pub fn auction_type_desc(&self) -> &str {
        &self.auction_type_desc
    }

    /// Passing `RawField::Absent` always succeeds and marks the record
    /// transient.
    pub fn set_key<'a>(&mut self, raw: impl Into<RawField<'a>>) -> FieldResult<()> {
        self.key = field::entity_key("auction type id", raw.into())?;
        Ok(())
    }

    pub fn set_auction_type_desc<'a>(&mut self, raw: impl Into<RawField<'a>>) -> FieldResult<()> {
        self.auction_type_desc =
            field::bounded_text("auction type description", raw.into(), DESC_MAX_CHARS)?;
        Ok(())
    }
}

impl Record for AuctionType {
    const ENTITY: &'static str = "auction type";
    const TABLE: &'static str = "auction_types";
    const KEY_COLUMN: &'static str = "auction_type_id";
    const DATA_COLUMNS: &'static [&'static str] = &["auction_type_desc"];

    fn key(&self) -> EntityKey {
        self.key
    }

    fn assign_key(&mut self, id: i64) {
        self.key = EntityKey::Persisted(id);
    }

    fn data_values(&self) -> Vec<Value> {
        vec![Value::Text(self.auction_type_desc.clone())]
    }

    fn from_row(row: &Row<'_>) -> Result<Self, RowError> {
        let key: i64 = row.get(Self::KEY_COLUMN)?;
        let auction_type_desc: String = row.get("auction_type_desc")?;
        Ok(Self::new(key, auction_type_desc.as_str())?)
    }
}
