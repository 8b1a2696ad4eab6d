//! Payment gateway adapters

pub mod simulated;
pub mod stripe;

pub use simulated::{SimulatedGateway, SimulatedOutcome};
pub use stripe::StripeGateway;
