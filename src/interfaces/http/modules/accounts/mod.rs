//! Account module: registration, login, refresh

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
