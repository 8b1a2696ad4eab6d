//! Reservation aggregate
//!
//! Contains the Reservation entity, its state machine, and repository interface.

pub mod model;
pub mod repository;

pub use model::{Reservation, ReservationStatus};
pub use repository::ReservationRepository;
