//! Tour package repository interface
//!
//! Seat counters and lifecycle flags are only written through
//! [`BookingTx`](crate::domain::BookingTx); this trait covers creation and reads.

use async_trait::async_trait;

use super::model::TourPackage;
use crate::domain::DomainResult;
use crate::shared::PaginatedResult;

#[async_trait]
pub trait TourPackageRepository: Send + Sync {
    async fn save(&self, package: TourPackage) -> DomainResult<()>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<TourPackage>>;

    /// Packages still open for booking (scheduled, with vacancies), soonest first
    async fn find_open(&self, page: u64, limit: u64) -> DomainResult<PaginatedResult<TourPackage>>;

    /// All packages of a driver, newest first
    async fn find_by_driver(&self, driver_id: &str) -> DomainResult<Vec<TourPackage>>;
}
