//! Post-auction feedback record.

use crate::model::field::{self, EntityKey, FieldResult, RawField};
use crate::repo::record::{Record, RowError};
use rusqlite::types::Value;
use rusqlite::Row;
use serde::Serialize;

const DESCRIPTION_MAX_CHARS: usize = 60;

/// Feedback a member leaves on a finished auction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feedback {
    key: EntityKey,
    auction_id: i64,
    member_id: i64,
    feedback_description: String,
    rating: i64,
}

impl Feedback {
    /// Builds a feedback entry, validating every field in declaration order.
    pub fn new<'a>(
        key: impl Into<RawField<'a>>,
        auction_id: impl Into<RawField<'a>>,
        member_id: impl Into<RawField<'a>>,
        feedback_description: impl Into<RawField<'a>>,
        rating: impl Into<RawField<'a>>,
    ) -> FieldResult<Self> {
        let mut feedback = Self {
            key: EntityKey::Transient,
            auction_id: 0,
            member_id: 0,
            feedback_description: String::new(),
            rating: 0,
        };
        feedback.set_key(key)?;
        feedback.set_auction_id(auction_id)?;
        feedback.set_member_id(member_id)?;
        feedback.set_feedback_description(feedback_description)?;
        feedback.set_rating(rating)?;
        Ok(feedback)
    }

    pub fn auction_id(&self) -> i64 {
        self.auction_id
    }

    pub fn member_id(&self) -> i64 {
        self.member_id
    }

    pub fn feedback_description(&self) -> &str {
        &self.feedback_description
    }

    pub fn rating(&self) -> i64 {
        self.rating
    }

    /// Passing `RawField::Absent` always succeeds and marks the record
    /// transient.
    pub fn set_key<'a>(&mut self, raw: impl Into<RawField<'a>>) -> FieldResult<()> {
        self.key = field::entity_key("feedback id", raw.into())?;
        Ok(())
    }

    pub fn set_auction_id<'a>(&mut self, raw: impl Into<RawField<'a>>) -> FieldResult<()> {
        self.auction_id = field::foreign_key("auction id", raw.into())?;
        Ok(())
    }

    pub fn set_member_id<'a>(&mut self, raw: impl Into<RawField<'a>>) -> FieldResult<()> {
        self.member_id = field::foreign_key("member id", raw.into())?;
        Ok(())
    }

    pub fn set_feedback_description<'a>(&mut self, raw: impl Into<RawField<'a>>) -> FieldResult<()> {
        self.feedback_description =
            field::bounded_text("feedback description", raw.into(), DESCRIPTION_MAX_CHARS)?;
        Ok(())
    }

    pub fn set_rating<'a>(&mut self, raw: impl Into<RawField<'a>>) -> FieldResult<()> {
        self.rating = field::positive_int("rating", raw.into())?;
        Ok(())
    }
}

impl Record for Feedback {
    const ENTITY: &'static str = "feedback";
    const TABLE: &'static str = "feedback";
    const KEY_COLUMN: &'static str = "feedback_id";
    const DATA_COLUMNS: &'static [&'static str] = &[
        "auction_id",
        "member_id",
        "feedback_description",
        "rating",
    ];

    fn key(&self) -> EntityKey {
        self.key
    }

    fn assign_key(&mut self, id: i64) {
        self.key = EntityKey::Persisted(id);
    }

    fn data_values(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.auction_id),
            Value::Integer(self.member_id),
            Value::Text(self.feedback_description.clone()),
            Value::Integer(self.rating),
        ]
    }

    fn from_row(row: &Row<'_>) -> Result<Self, RowError> {
        let key: i64 = row.get(Self::KEY_COLUMN)?;
        let feedback_description: String = row.get("feedback_description")?;
        Ok(Self::new(
            key,
            row.get::<_, i64>("auction_id")?,
            row.get::<_, i64>("member_id")?,
            feedback_description.as_str(),
            row.get::<_, i64>("rating")?,
        )?)
    }
}
