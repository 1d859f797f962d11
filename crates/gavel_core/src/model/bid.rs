//! Auction bid record.
//!
//! # Invariants
//! - `bid_date_time` is the only field in the crate that may read the
//!   clock: an absent value means "stamp with now", truncated to whole
//!   seconds so stored and in-memory values stay equal.

use crate::model::field::{self, format_date_time, EntityKey, FieldResult, RawField};
use crate::repo::record::{Record, RowError};
use chrono::{Local, NaiveDateTime, Timelike};
use rusqlite::types::Value;
use rusqlite::Row;
use serde::Serialize;

/// A member's bid on an auction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bid {
    key: EntityKey,
    auction_id: i64,
    bidder_member_id: i64,
    bid_date_time: NaiveDateTime,
    bid_dollar_amount: f64,
}

impl Bid {
    /// Builds a bid, validating every field in declaration order.
    ///
    /// Passing `RawField::Absent` for the bid date stamps the bid with the
    /// current date-time.
    pub fn new<'a>(
        key: impl Into<RawField<'a>>,
        auction_id: impl Into<RawField<'a>>,
        bidder_member_id: impl Into<RawField<'a>>,
        bid_date_time: impl Into<RawField<'a>>,
        bid_dollar_amount: impl Into<RawField<'a>>,
    ) -> FieldResult<Self> {
        let mut bid = Self {
            key: EntityKey::Transient,
            auction_id: 0,
            bidder_member_id: 0,
            bid_date_time: NaiveDateTime::default(),
            bid_dollar_amount: 0.0,
        };
        bid.set_key(key)?;
        bid.set_auction_id(auction_id)?;
        bid.set_bidder_member_id(bidder_member_id)?;
        bid.set_bid_date_time(bid_date_time)?;
        bid.set_bid_dollar_amount(bid_dollar_amount)?;
        Ok(bid)
    }

    pub fn auction_id(&self) -> i64 {
        self.auction_id
    }

    pub fn bidder_member_id(&self) -> i64 {
        self.bidder_member_id
    }

    pub fn bid_date_time(&self) -> NaiveDateTime {
        self.bid_date_time
    }

    pub fn bid_dollar_amount(&self) -> f64 {
        self.bid_dollar_amount
    }

    /// Passing `RawField::Absent` always succeeds and marks the record
    /// transient.
    pub fn set_key<'a>(&mut self, raw: impl Into<RawField<'a>>) -> FieldResult<()> {
        self.key = field::entity_key("bid id", raw.into())?;
        Ok(())
    }

    pub fn set_auction_id<'a>(&mut self, raw: impl Into<RawField<'a>>) -> FieldResult<()> {
        self.auction_id = field::foreign_key("auction id", raw.into())?;
        Ok(())
    }

    pub fn set_bidder_member_id<'a>(&mut self, raw: impl Into<RawField<'a>>) -> FieldResult<()> {
        self.bidder_member_id = field::foreign_key("bidder member id", raw.into())?;
        Ok(())
    }

    /// Absent input defaults to the current date-time at whole-second
    /// precision; any supplied value goes through full validation.
    pub fn set_bid_date_time<'a>(&mut self, raw: impl Into<RawField<'a>>) -> FieldResult<()> {
        self.bid_date_time = match raw.into() {
            RawField::Absent => {
                let now = Local::now().naive_local();
                now.with_nanosecond(0).unwrap_or(now)
            }
            other => field::date_time("bid date", other)?,
        };
        Ok(())
    }

    pub fn set_bid_dollar_amount<'a>(&mut self, raw: impl Into<RawField<'a>>) -> FieldResult<()> {
        self.bid_dollar_amount = field::money("bid dollar amount", raw.into())?;
        Ok(())
    }
}

impl Record for Bid {
    const ENTITY: &'static str = "bid";
    const TABLE: &'static str = "bids";
    const KEY_COLUMN: &'static str = "bid_id";
    const DATA_COLUMNS: &'static [&'static str] = &[
        "auction_id",
        "bidder_member_id",
        "bid_date_time",
        "bid_dollar_amount",
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
            Value::Integer(self.bidder_member_id),
            Value::Text(format_date_time(self.bid_date_time)),
            Value::Real(self.bid_dollar_amount),
        ]
    }

    fn from_row(row: &Row<'_>) -> Result<Self, RowError> {
        let key: i64 = row.get(Self::KEY_COLUMN)?;
        let bid_date_time: String = row.get("bid_date_time")?;
        Ok(Self::new(
            key,
            row.get::<_, i64>("auction_id")?,
            row.get::<_, i64>("bidder_member_id")?,
            bid_date_time.as_str(),
            row.get::<_, f64>("bid_dollar_amount")?,
        )?)
    }
}
