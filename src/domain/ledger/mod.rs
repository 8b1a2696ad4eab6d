//! Ledger aggregate
//!
//! Append-only money movements (the wallet's "transactions") and the
//! aggregates derived from them.

pub mod model;
pub mod repository;

pub use model::{DateRange, EntryType, LedgerEntry, LedgerTotals, TypeTotal};
pub use repository::LedgerRepository;
