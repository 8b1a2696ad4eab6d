//! Account aggregate
//!
//! Users and drivers share one table, distinguished by role.

pub mod model;
pub mod repository;

pub use model::{Account, Actor, Role};
pub use repository::AccountRepository;
