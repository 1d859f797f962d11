//! Persistence layer for marketplace records.
//!
//! # Responsibility
//! - Own the shared CRUD state machine and its error taxonomy.
//! - Isolate SQL and statement binding from the domain models' validation.
//!
//! # Invariants
//! - Precondition failures (`Conflict`, transient `NotFound`) are decided
//!   before any store round trip.
//! - Store diagnostics are wrapped with context, never swallowed.

pub mod record;

pub use record::{Record, RepoError, RepoResult, RowError};
