//! Seat inventory: the guarded decrement and release of `vacancies`.
//!
//! The free functions run inside a caller's [`BookingTx`] so the seat change
//! commits together with the reservation row. `InventoryService` wraps them
//! in a transaction of their own.

use std::sync::Arc;

use tracing::{debug, error};

use crate::domain::{BookingTx, DomainError, DomainResult, TourPackage, UnitOfWork};

/// Outcome of a seat release
#[derive(Debug, Clone)]
pub enum SeatRelease {
    Released(TourPackage),
    /// The increment would have passed capacity; vacancies were reset to
    /// `seats_available` instead.
    Clamped(TourPackage),
}

impl SeatRelease {
    pub fn package(&self) -> &TourPackage {
        match self {
            Self::Released(p) | Self::Clamped(p) => p,
        }
    }

    pub fn was_clamped(&self) -> bool {
        matches!(self, Self::Clamped(_))
    }
}

fn require_quantity(quantity: i32) -> DomainResult<()> {
    if quantity < 1 {
        return Err(DomainError::Validation(
            "quantity must be at least 1".to_string(),
        ));
    }
    Ok(())
}

async fn load(tx: &mut dyn BookingTx, package_id: &str) -> DomainResult<TourPackage> {
    tx.tour_package(package_id)
        .await?
        .ok_or_else(|| DomainError::not_found("TourPackage", package_id))
}

/// Take `quantity` seats from a scheduled package.
pub async fn reserve_seats(
    tx: &mut dyn BookingTx,
    package_id: &str,
    quantity: i32,
) -> DomainResult<TourPackage> {
    require_quantity(quantity)?;

    if tx.decrement_vacancies(package_id, quantity).await? {
        let package = load(tx, package_id).await?;
        debug!(
            package_id,
            quantity,
            vacancies = package.vacancies,
            "Seats reserved"
        );
        return Ok(package);
    }

    // The guard failed; read the row to report why.
    let package = load(tx, package_id).await?;
    package.ensure_bookable()?;
    Err(DomainError::InsufficientCapacity {
        requested: quantity,
        available: package.vacancies,
    })
}

/// Give `quantity` seats back, never past capacity.
pub async fn release_seats(
    tx: &mut dyn BookingTx,
    package_id: &str,
    quantity: i32,
) -> DomainResult<SeatRelease> {
    require_quantity(quantity)?;

    if tx.increment_vacancies(package_id, quantity).await? {
        let package = load(tx, package_id).await?;
        debug!(
            package_id,
            quantity,
            vacancies = package.vacancies,
            "Seats released"
        );
        return Ok(SeatRelease::Released(package));
    }

    let before = load(tx, package_id).await?;
    error!(
        package_id,
        quantity,
        vacancies = before.vacancies,
        seats_available = before.seats_available,
        "Seat release exceeds capacity, clamping vacancies (invariant violation)"
    );
    metrics::counter!("seat_release_clamped_total").increment(1);
    tx.clamp_vacancies(package_id).await?;
    Ok(SeatRelease::Clamped(load(tx, package_id).await?))
}

/// Standalone seat operations, one transaction each.
pub struct InventoryService {
    uow: Arc<dyn UnitOfWork>,
}

impl InventoryService {
    pub fn new(uow: Arc<dyn UnitOfWork>) -> Self {
        Self { uow }
    }

    pub async fn reserve_seats(&self, package_id: &str, quantity: i32) -> DomainResult<TourPackage> {
        let mut tx = self.uow.begin().await?;
        let package = reserve_seats(tx.as_mut(), package_id, quantity).await?;
        tx.commit().await?;
        Ok(package)
    }

    pub async fn release_seats(&self, package_id: &str, quantity: i32) -> DomainResult<SeatRelease> {
        let mut tx = self.uow.begin().await?;
        let release = release_seats(tx.as_mut(), package_id, quantity).await?;
        tx.commit().await?;
        Ok(release)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::Harness;

    #[tokio::test]
    async fn reserve_then_release_restores_vacancies() {
        let h = Harness::new().await;
        let pkg = h.package(5, 1000).await;

        let after = h.inventory.reserve_seats(&pkg.id, 2).await.unwrap();
        assert_eq!(after.vacancies, 3);

        let release = h.inventory.release_seats(&pkg.id, 2).await.unwrap();
        assert!(!release.was_clamped());
        assert_eq!(release.package().vacancies, 5);
    }

    #[tokio::test]
    async fn over_capacity_reserve_reports_available() {
        let h = Harness::new().await;
        let pkg = h.package(2, 1000).await;

        let err = h.inventory.reserve_seats(&pkg.id, 3).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::InsufficientCapacity {
                requested: 3,
                available: 2
            }
        ));
        assert_eq!(h.vacancies(&pkg.id).await, 2);
    }

    #[tokio::test]
    async fn release_past_capacity_is_clamped() {
        let h = Harness::new().await;
        let pkg = h.package(4, 1000).await;
        h.inventory.reserve_seats(&pkg.id, 1).await.unwrap();

        let release = h.inventory.release_seats(&pkg.id, 3).await.unwrap();
        assert!(release.was_clamped());
        assert_eq!(release.package().vacancies, 4);
    }

    #[tokio::test]
    async fn zero_quantity_and_missing_package() {
        let h = Harness::new().await;
        let pkg = h.package(4, 1000).await;
        assert!(matches!(
            h.inventory.reserve_seats(&pkg.id, 0).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            h.inventory.reserve_seats("missing", 1).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn running_package_is_unavailable() {
        let h = Harness::new().await;
        let pkg = h.package(4, 1000).await;
        h.tours.start(&h.driver, &pkg.id).await.unwrap();

        assert!(matches!(
            h.inventory.reserve_seats(&pkg.id, 1).await,
            Err(DomainError::PackageUnavailable(_))
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_last_seat_has_one_winner() {
        let h = Harness::on_file().await;
        let pkg = h.package(1, 1000).await;

        let (a, b, c, d) = tokio::join!(
            h.inventory.reserve_seats(&pkg.id, 1),
            h.inventory.reserve_seats(&pkg.id, 1),
            h.inventory.reserve_seats(&pkg.id, 1),
            h.inventory.reserve_seats(&pkg.id, 1)
        );
        let results = [a, b, c, d];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        for loser in results.iter().filter_map(|r| r.as_ref().err()) {
            assert!(
                matches!(loser, DomainError::InsufficientCapacity { .. }),
                "{loser:?}"
            );
        }
        assert_eq!(h.vacancies(&pkg.id).await, 0);
    }
}
