//! Auction listing record.
//!
//! # Responsibility
//! - Tie an item, a seller and an auction type together with the listing
//!   window and sale terms.
//!
//! # Invariants
//! - All three references are positive keys; the store enforces that the
//!   referenced rows exist.
//! - Start and end date-times are required; neither defaults to the clock.
//! - The final price obeys the money bounds (seven integer digits, cents
//!   precision).

use crate::model::field::{self, format_date_time, EntityKey, FieldResult, RawField};
use crate::repo::record::{Record, RowError};
use chrono::NaiveDateTime;
use rusqlite::types::Value;
use rusqlite::Row;
use serde::Serialize;

const PATH_MAX_CHARS: usize = 255;
const POLICY_MAX_CHARS: usize = 255;

/// A single auction listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Auction {
    key: EntityKey,
    auction_type_id: i64,
    item_id: i64,
    seller_member_id: i64,
    end_date_time: NaiveDateTime,
    item_photo_path: String,
    item_qty: i64,
    return_policy: String,
    sold_final_price: f64,
    start_date_time: NaiveDateTime,
}

impl Auction {
    /// Builds an auction, validating every field in declaration order.
    ///
    /// The order matches the store bind order; the first failing field
    /// aborts construction with its `FieldError`.
    #[allow(clippy::too_many_arguments)]
    pub fn new<'a>(
        key: impl Into<RawField<'a>>,
        auction_type_id: impl Into<RawField<'a>>,
        item_id: impl Into<RawField<'a>>,
        seller_member_id: impl Into<RawField<'a>>,
        end_date_time: impl Into<RawField<'a>>,
        item_photo_path: impl Into<RawField<'a>>,
        item_qty: impl Into<RawField<'a>>,
        return_policy: impl Into<RawField<'a>>,
        sold_final_price: impl Into<RawField<'a>>,
        start_date_time: impl Into<RawField<'a>>,
    ) -> FieldResult<Self> {
        let mut auction = Self {
            key: EntityKey::Transient,
            auction_type_id: 0,
            item_id: 0,
            seller_member_id: 0,
            end_date_time: NaiveDateTime::default(),
            item_photo_path: String::new(),
            item_qty: 0,
            return_policy: String::new(),
            sold_final_price: 0.0,
            start_date_time: NaiveDateTime::default(),
        };
        auction.set_key(key)?;
        auction.set_auction_type_id(auction_type_id)?;
        auction.set_item_id(item_id)?;
        auction.set_seller_member_id(seller_member_id)?;
        auction.set_end_date_time(end_date_time)?;
        auction.set_item_photo_path(item_photo_path)?;
        auction.set_item_qty(item_qty)?;
        auction.set_return_policy(return_policy)?;
        auction.set_sold_final_price(sold_final_price)?;
        auction.set_start_date_time(start_date_time)?;
        Ok(auction)
    }

    pub fn auction_type_id(&self) -> i64 {
        self.auction_type_id
    }

    pub fn item_id(&self) -> i64 {
        self.item_id
    }

    pub fn seller_member_id(&self) -> i64 {
        self.seller_member_id
    }

    pub fn end_date_time(&self) -> NaiveDateTime {
        self.end_date_time
    }

    pub fn item_photo_path(&self) -> &str {
        &self.item_photo_path
    }

    pub fn item_qty(&self) -> i64 {
        self.item_qty
    }

    pub fn return_policy(&self) -> &str {
        &self.return_policy
    }

    pub fn sold_final_price(&self) -> f64 {
        self.sold_final_price
    }

    pub fn start_date_time(&self) -> NaiveDateTime {
        self.start_date_time
    }

    /// Passing `RawField::Absent` always succeeds and marks the record
    /// transient.
    pub fn set_key<'a>(&mut self, raw: impl Into<RawField<'a>>) -> FieldResult<()> {
        self.key = field::entity_key("auction id", raw.into())?;
        Ok(())
    }

    pub fn set_auction_type_id<'a>(&mut self, raw: impl Into<RawField<'a>>) -> FieldResult<()> {
        self.auction_type_id = field::foreign_key("auction type id", raw.into())?;
        Ok(())
    }

    pub fn set_item_id<'a>(&mut self, raw: impl Into<RawField<'a>>) -> FieldResult<()> {
        self.item_id = field::foreign_key("item id", raw.into())?;
        Ok(())
    }

    pub fn set_seller_member_id<'a>(&mut self, raw: impl Into<RawField<'a>>) -> FieldResult<()> {
        self.seller_member_id = field::foreign_key("seller member id", raw.into())?;
        Ok(())
    }

    pub fn set_end_date_time<'a>(&mut self, raw: impl Into<RawField<'a>>) -> FieldResult<()> {
        self.end_date_time = field::date_time("auction end date", raw.into())?;
        Ok(())
    }

    pub fn set_item_photo_path<'a>(&mut self, raw: impl Into<RawField<'a>>) -> FieldResult<()> {
        self.item_photo_path = field::bounded_text("item photo path", raw.into(), PATH_MAX_CHARS)?;
        Ok(())
    }

    pub fn set_item_qty<'a>(&mut self, raw: impl Into<RawField<'a>>) -> FieldResult<()> {
        self.item_qty = field::positive_int("item qty", raw.into())?;
        Ok(())
    }

    pub fn set_return_policy<'a>(&mut self, raw: impl Into<RawField<'a>>) -> FieldResult<()> {
        self.return_policy = field::bounded_text("return policy", raw.into(), POLICY_MAX_CHARS)?;
        Ok(())
    }

    pub fn set_sold_final_price<'a>(&mut self, raw: impl Into<RawField<'a>>) -> FieldResult<()> {
        self.sold_final_price = field::money("final price", raw.into())?;
        Ok(())
    }

    pub fn set_start_date_time<'a>(&mut self, raw: impl Into<RawField<'a>>) -> FieldResult<()> {
        self.start_date_time = field::date_time("auction start date", raw.into())?;
        Ok(())
    }
}

impl Record for Auction {
    const ENTITY: &'static str = "auction";
    const TABLE: &'static str = "auctions";
    const KEY_COLUMN: &'static str = "auction_id";
    const DATA_COLUMNS: &'static [&'static str] = &[
        "auction_type_id",
        "item_id",
        "seller_member_id",
        "end_date_time",
        "item_photo_path",
        "item_qty",
        "return_policy",
        "sold_final_price",
        "start_date_time",
    ];

    fn key(&self) -> EntityKey {
        self.key
    }

    fn assign_key(&mut self, id: i64) {
        self.key = EntityKey::Persisted(id);
    }

    fn data_values(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.auction_type_id),
            Value::Integer(self.item_id),
            Value::Integer(self.seller_member_id),
            Value::Text(format_date_time(self.end_date_time)),
            Value::Text(self.item_photo_path.clone()),
            Value::Integer(self.item_qty),
            Value::Text(self.return_policy.clone()),
            Value::Real(self.sold_final_price),
            Value::Text(format_date_time(self.start_date_time)),
        ]
    }

    fn from_row(row: &Row<'_>) -> Result<Self, RowError> {
        let key: i64 = row.get(Self::KEY_COLUMN)?;
        let end_date_time: String = row.get("end_date_time")?;
        let item_photo_path: String = row.get("item_photo_path")?;
        let return_policy: String = row.get("return_policy")?;
        let start_date_time: String = row.get("start_date_time")?;
        Ok(Self::new(
            key,
            row.get::<_, i64>("auction_type_id")?,
            row.get::<_, i64>("item_id")?,
            row.get::<_, i64>("seller_member_id")?,
            end_date_time.as_str(),
            item_photo_path.as_str(),
            row.get::<_, i64>("item_qty")?,
            return_policy.as_str(),
            row.get::<_, f64>("sold_final_price")?,
            start_date_time.as_str(),
        )?)
    }
}
