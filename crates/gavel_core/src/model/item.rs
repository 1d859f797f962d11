//! Catalog item record.
//!
//! Brand and model are short labels; the description carries the long-form
//! listing text and gets a much larger bound.

use crate::model::field::{self, EntityKey, FieldResult, RawField};
use crate::repo::record::{Record, RowError};
use rusqlite::types::Value;
use rusqlite::Row;
use serde::Serialize;

const LABEL_MAX_CHARS: usize = 50;
const DESCRIPTION_MAX_CHARS: usize = 1000;

/// A physical item offered for auction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    key: EntityKey,
    item_brand: String,
    item_description: String,
    item_model: String,
}

impl Item {
    /// Builds an item, validating every field in declaration order.
    pub fn new<'a>(
        key: impl Into<RawField<'a>>,
        item_brand: impl Into<RawField<'a>>,
        item_description: impl Into<RawField<'a>>,
        item_model: impl Into<RawField<'a>>,
    ) -> FieldResult<Self> {
        let mut item = Self {
            key: EntityKey::Transient,
            item_brand: String::new(),
            item_description: String::new(),
            item_model: String::new(),
        };
        item.set_key(key)?;
        item.set_item_brand(item_brand)?;
        item.set_item_description(item_description)?;
        item.set_item_model(item_model)?;
        Ok(item)
    }

    pub fn item_brand(&self) -> &str {
        &self.item_brand
    }

    pub fn item_description(&self) -> &str {
        &self.item_description
    }

    pub fn item_model(&self) -> &str {
        &self.item_model
    }

    /// Passing `RawField::Absent` always succeeds and marks the record
    /// transient.
    pub fn set_key<'a>(&mut self, raw: impl Into<RawField<'a>>) -> FieldResult<()> {
        self.key = field::entity_key("item id", raw.into())?;
        Ok(())
    }

    pub fn set_item_brand<'a>(&mut self, raw: impl Into<RawField<'a>>) -> FieldResult<()> {
        self.item_brand = field::bounded_text("item brand", raw.into(), LABEL_MAX_CHARS)?;
        Ok(())
    }

    pub fn set_item_description<'a>(&mut self, raw: impl Into<RawField<'a>>) -> FieldResult<()> {
        self.item_description =
            field::bounded_text("item description", raw.into(), DESCRIPTION_MAX_CHARS)?;
        Ok(())
    }

    pub fn set_item_model<'a>(&mut self, raw: impl Into<RawField<'a>>) -> FieldResult<()> {
        self.item_model = field::bounded_text("item model", raw.into(), LABEL_MAX_CHARS)?;
        Ok(())
    }
}

impl Record for Item {
    const ENTITY: &'static str = "item";
    const TABLE: &'static str = "items";
    const KEY_COLUMN: &'static str = "item_id";
    const DATA_COLUMNS: &'static [&'static str] = &["item_brand", "item_description", "item_model"];

    fn key(&self) -> EntityKey {
        self.key
    }

    fn assign_key(&mut self, id: i64) {
        self.key = EntityKey::Persisted(id);
    }

    fn data_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.item_brand.clone()),
            Value::Text(self.item_description.clone()),
            Value::Text(self.item_model.clone()),
        ]
    }

    fn from_row(row: &Row<'_>) -> Result<Self, RowError> {
        let key: i64 = row.get(Self::KEY_COLUMN)?;
        let item_brand: String = row.get("item_brand")?;
        let item_description: String = row.get("item_description")?;
        let item_model: String = row.get("item_model")?;
        Ok(Self::new(
            key,
            item_brand.as_str(),
            item_description.as_str(),
            item_model.as_str(),
        )?)
    }
}
