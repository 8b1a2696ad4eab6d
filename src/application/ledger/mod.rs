//! Ledger use-cases: wallet totals, listings, settlement.

pub mod service;
pub mod settlement;

pub use service::LedgerService;
pub use settlement::settlement_conversion;
