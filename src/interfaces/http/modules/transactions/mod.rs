//! Transaction module: ledger listings and totals

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
