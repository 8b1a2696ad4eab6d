//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::account::AccountRepository;
use crate::domain::fleet::FleetRepository;
use crate::domain::ledger::LedgerRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::reservation::ReservationRepository;
use crate::domain::tour_package::TourPackageRepository;

use super::account_repository::SeaOrmAccountRepository;
use super::fleet_repository::SeaOrmFleetRepository;
use super::ledger_repository::SeaOrmLedgerRepository;
use super::reservation_repository::SeaOrmReservationRepository;
use super::tour_package_repository::SeaOrmTourPackageRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let pkg = repos.tour_packages().find_by_id(&id).await?;
/// let rows = repos.ledger().find_by_reservation(&reservation_id).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    accounts: SeaOrmAccountRepository,
    fleet: SeaOrmFleetRepository,
    tour_packages: SeaOrmTourPackageRepository,
    reservations: SeaOrmReservationRepository,
    ledger: SeaOrmLedgerRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            accounts: SeaOrmAccountRepository::new(db.clone()),
            fleet: SeaOrmFleetRepository::new(db.clone()),
            tour_packages: SeaOrmTourPackageRepository::new(db.clone()),
            reservations: SeaOrmReservationRepository::new(db.clone()),
            ledger: SeaOrmLedgerRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn accounts(&self) -> &dyn AccountRepository {
        &self.accounts
    }

    fn fleet(&self) -> &dyn FleetRepository {
        &self.fleet
    }

    fn tour_packages(&self) -> &dyn TourPackageRepository {
        &self.tour_packages
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }

    fn ledger(&self) -> &dyn LedgerRepository {
        &self.ledger
    }
}
