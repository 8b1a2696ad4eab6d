//! Payment gateway port
//!
//! The core only needs two things from a payment provider: create an intent
//! for a reservation, and read it back to confirm it succeeded.

pub mod gateway;

pub use gateway::{GatewayError, IntentRequest, PaymentGateway, PaymentIntent, PaymentStatus};
