//! Identity module: account registration and authentication
//!
//! Contains the `AccountService` which orchestrates sign-up, login and
//! token refresh for both users and drivers.

pub mod service;

pub use service::{AccountService, AuthTokens, Registration};
