//! Fleet module: cars and tourist points of a driver

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
