//! Tour package module: catalogue, registration, start and finish

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
