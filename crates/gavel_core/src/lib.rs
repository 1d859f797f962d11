//! Core data-access layer for the Gavel auction marketplace.
//! This crate is the single source of truth for field validation and
//! persistence invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::field::{
    format_date_time, EntityKey, FieldError, FieldResult, RawField, DATE_TIME_FORMAT,
};
pub use model::{Auction, AuctionType, Bid, Feedback, Item, Member};
pub use repo::record::{Record, RepoError, RepoResult, RowError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
