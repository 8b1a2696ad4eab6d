//! Fleet aggregate: driver-owned cars and tourist points.

pub mod model;
pub mod repository;

pub use model::{Car, TouristPoint};
pub use repository::FleetRepository;
