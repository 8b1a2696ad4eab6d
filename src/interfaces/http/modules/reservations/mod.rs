//! Reservation module: create, confirm, cancel, list

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
