//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories, the unified RepositoryProvider and the
//! transactional unit of work.

pub mod account_repository;
pub mod fleet_repository;
pub mod ledger_repository;
mod mapping;
pub mod repository_provider;
pub mod reservation_repository;
pub mod tour_package_repository;
pub mod unit_of_work;

pub use repository_provider::SeaOrmRepositoryProvider;
pub use unit_of_work::{SeaOrmBookingTx, SeaOrmUnitOfWork};
