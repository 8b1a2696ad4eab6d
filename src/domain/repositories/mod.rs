//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: read and create access to every aggregate
//! - `UnitOfWork` / `BookingTx`: the transactional writes that move seats,
//!   reservation state and ledger rows together
//! - `DomainResult`: standard result type for domain operations

use async_trait::async_trait;

use super::account::AccountRepository;
use super::fleet::FleetRepository;
use super::ledger::{LedgerEntry, LedgerRepository};
use super::reservation::{Reservation, ReservationRepository, ReservationStatus};
use super::tour_package::{TourLifecycle, TourPackage, TourPackageRepository};
use crate::shared::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

// ── RepositoryProvider ──────────────────────────────────────────

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let pkg = repos.tour_packages().find_by_id("...").await?;
///     let mine = repos.reservations().find_by_user("...").await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn accounts(&self) -> &dyn AccountRepository;
    fn fleet(&self) -> &dyn FleetRepository;
    fn tour_packages(&self) -> &dyn TourPackageRepository;
    fn reservations(&self) -> &dyn ReservationRepository;
    fn ledger(&self) -> &dyn LedgerRepository;
}

// ── Unit of work ────────────────────────────────────────────────

/// Opens booking transactions.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    async fn begin(&self) -> DomainResult<Box<dyn BookingTx>>;
}

/// One database transaction spanning seat counters, reservation state and
/// ledger rows.
///
/// Dropping the transaction without `commit` rolls every write back.
/// Conditional writes return `false` (or `0`) when their guard did not match,
/// so callers can re-read and report the precise reason.
#[async_trait]
pub trait BookingTx: Send {
    async fn tour_package(&mut self, id: &str) -> DomainResult<Option<TourPackage>>;

    /// `vacancies -= qty` only when `vacancies >= qty` and the package is
    /// still scheduled. Returns whether a row changed.
    async fn decrement_vacancies(&mut self, package_id: &str, qty: i32) -> DomainResult<bool>;

    /// `vacancies += qty` only when the result stays within capacity.
    /// Returns whether a row changed.
    async fn increment_vacancies(&mut self, package_id: &str, qty: i32) -> DomainResult<bool>;

    /// Force `vacancies = seats_available`.
    async fn clamp_vacancies(&mut self, package_id: &str) -> DomainResult<()>;

    /// Persist the lifecycle flags and dates of `package` when the stored row
    /// is still in `expected`.
    async fn update_lifecycle(
        &mut self,
        package: &TourPackage,
        expected: TourLifecycle,
    ) -> DomainResult<bool>;

    async fn insert_reservation(&mut self, reservation: &Reservation) -> DomainResult<()>;

    async fn reservation(&mut self, id: &str) -> DomainResult<Option<Reservation>>;

    /// Persist the flags and timestamps of `reservation` when the stored row
    /// is still in `expected`.
    async fn transition_reservation(
        &mut self,
        reservation: &Reservation,
        expected: ReservationStatus,
    ) -> DomainResult<bool>;

    /// Confirmed, non-canceled reservations of a package
    async fn confirmed_reservations_for_package(
        &mut self,
        package_id: &str,
    ) -> DomainResult<Vec<Reservation>>;

    /// Ledger rows tied to any of `reservation_ids`, oldest first
    async fn entries_for_reservations(
        &mut self,
        reservation_ids: &[String],
    ) -> DomainResult<Vec<LedgerEntry>>;

    async fn append_entries(&mut self, entries: &[LedgerEntry]) -> DomainResult<()>;

    async fn commit(self: Box<Self>) -> DomainResult<()>;
}
