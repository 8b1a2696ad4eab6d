//! Booking use-cases: seat inventory, reservations, tour lifecycle.

pub mod inventory;
pub mod reservation;
pub mod settings;
pub mod tour;

pub use inventory::{release_seats, reserve_seats, InventoryService, SeatRelease};
pub use reservation::ReservationService;
pub use settings::{BookingSettings, SettlementMode};
pub use tour::{FinishedTour, PublishPackage, TourService};
