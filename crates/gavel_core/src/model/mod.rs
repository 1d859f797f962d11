//! Validated domain records for the auction marketplace.
//!
//! # Responsibility
//! - Define the six record shapes and their field-level validation rules.
//! - Keep every mutation path behind the validators in [`field`].
//!
//! # Invariants
//! - A record can only exist with fully validated fields.
//! - Relationships between records are plain positive-key references,
//!   never object graphs.

pub mod auction;
pub mod auction_type;
pub mod bid;
pub mod feedback;
pub mod field;
pub mod item;
pub mod member;

pub use auction::Auction;
pub use auction_type::AuctionType;
pub use bid::Bid;
pub use feedback::Feedback;
pub use item::Item;
pub use member::Member;
