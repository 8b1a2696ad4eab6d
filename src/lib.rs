//! # Tour booking service
//!
//! Backend for a tour booking platform: drivers publish tour packages with a
//! fixed number of seats, users reserve and pay for seats, and every money
//! movement lands in an append-only ledger.
//!
//! ## Architecture
//!
//! - **domain**: entities, state machines and the repository/gateway ports
//! - **application**: use-case services (booking, fleet, identity, ledger)
//! - **infrastructure**: SeaORM persistence, JWT and bcrypt, payment adapters
//! - **interfaces**: the axum REST API
//! - **shared**: errors, money helpers, pagination, shutdown
//! - **server**: process lifecycle shared by the binary and tests

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig, ConfigError};
pub use infrastructure::{init_database, DatabaseConfig};
pub use interfaces::http::{create_api_router, AppState};
