//! Tour package publishing and the driver's start / finish actions

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::application::ledger::settlement_conversion;
use crate::domain::{
    Actor, BookingTx, DomainError, DomainResult, LedgerEntry, NewTourPackage, RepositoryProvider,
    Role, TourLifecycle, TourPackage, TourType, UnitOfWork,
};
use crate::shared::PaginatedResult;

/// Package fields supplied by the publishing driver
#[derive(Debug, Clone)]
pub struct PublishPackage {
    pub car_id: Option<String>,
    pub tourist_point_id: Option<String>,
    pub title: String,
    pub origin_local: String,
    pub destiny_local: String,
    pub date_tour: DateTime<Utc>,
    /// Minor units per seat
    pub price: i64,
    pub seats_available: i32,
    pub tour_type: TourType,
    pub image_url: Option<String>,
}

/// A finished package and the credits its settlement produced
#[derive(Debug, Clone)]
pub struct FinishedTour {
    pub package: TourPackage,
    pub settled: Vec<LedgerEntry>,
}

pub struct TourService {
    repos: Arc<dyn RepositoryProvider>,
    uow: Arc<dyn UnitOfWork>,
}

impl TourService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, uow: Arc<dyn UnitOfWork>) -> Self {
        Self { repos, uow }
    }

    pub async fn publish(&self, actor: &Actor, input: PublishPackage) -> DomainResult<TourPackage> {
        actor.require(Role::Driver)?;

        if let Some(car_id) = &input.car_id {
            let car = self
                .repos
                .fleet()
                .find_car(car_id)
                .await?
                .ok_or_else(|| DomainError::not_found("Car", car_id.clone()))?;
            if car.driver_id != actor.id {
                return Err(DomainError::Forbidden(format!(
                    "car {} belongs to another driver",
                    car_id
                )));
            }
            if input.seats_available > car.capacity {
                return Err(DomainError::Validation(format!(
                    "seatsAvailable {} exceeds car capacity {}",
                    input.seats_available, car.capacity
                )));
            }
        }
        if let Some(point_id) = &input.tourist_point_id {
            let point = self
                .repos
                .fleet()
                .find_tourist_point(point_id)
                .await?
                .ok_or_else(|| DomainError::not_found("TouristPoint", point_id.clone()))?;
            if point.driver_id != actor.id {
                return Err(DomainError::Forbidden(format!(
                    "tourist point {} belongs to another driver",
                    point_id
                )));
            }
        }

        let package = TourPackage::new(NewTourPackage {
            driver_id: actor.id.clone(),
            car_id: input.car_id,
            tourist_point_id: input.tourist_point_id,
            title: input.title,
            origin_local: input.origin_local,
            destiny_local: input.destiny_local,
            date_tour: input.date_tour,
            price: input.price,
            seats_available: input.seats_available,
            tour_type: input.tour_type,
            image_url: input.image_url,
        })?;
        self.repos.tour_packages().save(package.clone()).await?;

        info!(
            package_id = %package.id,
            driver_id = %actor.id,
            seats = package.seats_available,
            price = package.price,
            tour_type = %package.tour_type,
            "Tour package published"
        );
        Ok(package)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list_open(&self, page: u64, limit: u64) -> DomainResult<PaginatedResult<TourPackage>> {
        self.repos.tour_packages().find_open(page, limit).await
    }

    pub async fn get(&self, package_id: &str) -> DomainResult<TourPackage> {
        self.repos
            .tour_packages()
            .find_by_id(package_id)
            .await?
            .ok_or_else(|| DomainError::not_found("TourPackage", package_id))
    }

    pub async fn list_by_driver(&self, driver_id: &str) -> DomainResult<Vec<TourPackage>> {
        self.repos.tour_packages().find_by_driver(driver_id).await
    }

    // ── Lifecycle ───────────────────────────────────────────────

    /// Scheduled → Running. Reservations close once the tour runs.
    pub async fn start(&self, actor: &Actor, package_id: &str) -> DomainResult<TourPackage> {
        let mut package = self.owned(actor, package_id).await?;
        let expected = package.lifecycle();
        package.start(Utc::now())?;

        let mut tx = self.uow.begin().await?;
        apply_lifecycle(tx.as_mut(), &package, expected).await?;
        tx.commit().await?;

        metrics::counter!("tours_started_total").increment(1);
        info!(
            package_id = %package.id,
            seats_sold = package.seats_sold(),
            "Tour started"
        );
        Ok(package)
    }

    /// Running → Finalised, settling held driver earnings in the same
    /// transaction.
    pub async fn finish(&self, actor: &Actor, package_id: &str) -> DomainResult<FinishedTour> {
        let mut package = self.owned(actor, package_id).await?;
        let expected = package.lifecycle();
        package.finish(Utc::now())?;

        let mut tx = self.uow.begin().await?;
        apply_lifecycle(tx.as_mut(), &package, expected).await?;
        let settled = settlement_conversion(tx.as_mut(), &package.id).await?;
        tx.commit().await?;

        metrics::counter!("tours_finished_total").increment(1);
        info!(
            package_id = %package.id,
            settled = settled.len(),
            "Tour finished"
        );
        Ok(FinishedTour { package, settled })
    }

    async fn owned(&self, actor: &Actor, package_id: &str) -> DomainResult<TourPackage> {
        actor.require(Role::Driver)?;
        let package = self.get(package_id).await?;
        package.ensure_owned_by(&actor.id)?;
        Ok(package)
    }
}

/// Write the new flags, or report the state a concurrent request left.
///
/// Runs as the transaction's first statement; the lifecycle was read
/// outside it and the guard catches anything that moved since.
async fn apply_lifecycle(
    tx: &mut dyn BookingTx,
    package: &TourPackage,
    expected: TourLifecycle,
) -> DomainResult<()> {
    if tx.update_lifecycle(package, expected).await? {
        return Ok(());
    }
    let current = tx
        .tour_package(&package.id)
        .await?
        .ok_or_else(|| DomainError::not_found("TourPackage", package.id.clone()))?;
    Err(match current.lifecycle() {
        TourLifecycle::Running => DomainError::AlreadyRunning(current.id),
        TourLifecycle::Finalised => DomainError::TourFinalised(current.id),
        TourLifecycle::Scheduled => DomainError::NotRunning(current.id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::Harness;
    use crate::domain::{DateRange, EntryType, ReservationStatus};

    #[tokio::test]
    async fn start_and_finish_settle_confirmed_holds() {
        let h = Harness::new().await;
        let pkg = h.package(6, 1000).await;

        let paid = h.reservations.create(&h.user, &pkg.id, 2).await.unwrap();
        h.pay_and_confirm(&paid).await.unwrap();
        let refunded = h.reservations.create(&h.user, &pkg.id, 1).await.unwrap();
        h.pay_and_confirm(&refunded).await.unwrap();
        h.reservations.cancel(&h.user, &refunded.id).await.unwrap();
        let unpaid = h.reservations.create(&h.user, &pkg.id, 1).await.unwrap();

        let started = h.tours.start(&h.driver, &pkg.id).await.unwrap();
        assert!(started.is_running);
        assert!(started.start_date.is_some());

        let finished = h.tours.finish(&h.driver, &pkg.id).await.unwrap();
        assert!(finished.package.is_finalised);
        assert!(!finished.package.is_running);
        assert!(finished.package.end_date.is_some());
        assert_eq!(finished.settled.len(), 1);
        assert_eq!(finished.settled[0].reservation_id.as_deref(), Some(paid.id.as_str()));

        // Realized earnings equal the settled confirmed amounts
        let totals = h
            .ledger
            .totals(&h.driver, Role::Driver, DateRange::default())
            .await
            .unwrap();
        assert_eq!(totals.realized, 2000);
        assert_eq!(totals.held, 0);
        assert_eq!(totals.by_type[&EntryType::Pendant].count, 2);
        assert_eq!(h.reload(&unpaid.id).await.status(), ReservationStatus::Pending);
    }

    #[tokio::test]
    async fn finalised_package_cannot_start_again() {
        let h = Harness::new().await;
        let pkg = h.package(3, 1000).await;
        h.tours.start(&h.driver, &pkg.id).await.unwrap();
        h.tours.finish(&h.driver, &pkg.id).await.unwrap();

        let err = h.tours.start(&h.driver, &pkg.id).await.unwrap_err();
        assert!(matches!(err, DomainError::TourFinalised(_)));
        assert!(err.is_state_conflict());

        let stored = h.tours.get(&pkg.id).await.unwrap();
        assert!(stored.is_finalised);
        assert!(!stored.is_running);
    }

    #[tokio::test]
    async fn lifecycle_errors() {
        let h = Harness::new().await;
        let pkg = h.package(3, 1000).await;

        assert!(matches!(
            h.tours.finish(&h.driver, &pkg.id).await,
            Err(DomainError::NotRunning(_))
        ));
        let other = h.another_driver().await;
        assert!(matches!(
            h.tours.start(&other, &pkg.id).await,
            Err(DomainError::Forbidden(_))
        ));
        assert!(matches!(
            h.tours.start(&h.user, &pkg.id).await,
            Err(DomainError::Forbidden(_))
        ));
        h.tours.start(&h.driver, &pkg.id).await.unwrap();
        assert!(matches!(
            h.tours.start(&h.driver, &pkg.id).await,
            Err(DomainError::AlreadyRunning(_))
        ));
    }

    #[tokio::test]
    async fn cancel_after_settlement_reverses_the_credit() {
        let h = Harness::new().await;
        let pkg = h.package(3, 1000).await;
        let r = h.reservations.create(&h.user, &pkg.id, 1).await.unwrap();
        h.pay_and_confirm(&r).await.unwrap();
        h.tours.start(&h.driver, &pkg.id).await.unwrap();
        h.tours.finish(&h.driver, &pkg.id).await.unwrap();

        h.reservations.cancel(&h.driver, &r.id).await.unwrap();
        let totals = h
            .ledger
            .totals(&h.driver, Role::Driver, DateRange::default())
            .await
            .unwrap();
        assert_eq!(totals.realized, 0);
        assert_eq!(totals.held, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_starts_have_one_winner() {
        let h = Harness::on_file().await;
        let pkg = h.package(3, 1000).await;

        let (a, b, c) = tokio::join!(
            h.tours.start(&h.driver, &pkg.id),
            h.tours.start(&h.driver, &pkg.id),
            h.tours.start(&h.driver, &pkg.id)
        );
        let results = [a, b, c];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        for loser in results.iter().filter_map(|r| r.as_ref().err()) {
            assert!(matches!(loser, DomainError::AlreadyRunning(_)), "{loser:?}");
        }
        assert!(h.tours.get(&pkg.id).await.unwrap().is_running);
    }

    #[tokio::test]
    async fn publish_checks_fleet_ownership() {
        let h = Harness::new().await;
        let car = h.fleet.register_car(&h.driver, "Buggy", "abc1d23", 4).await.unwrap();
        let other = h.another_driver().await;

        let mut input = Harness::publish_input(4, 1000);
        input.car_id = Some(car.id.clone());
        assert!(matches!(
            h.tours.publish(&other, input.clone()).await,
            Err(DomainError::Forbidden(_))
        ));

        input.seats_available = 5;
        assert!(matches!(
            h.tours.publish(&h.driver, input.clone()).await,
            Err(DomainError::Validation(_))
        ));

        input.seats_available = 4;
        let pkg = h.tours.publish(&h.driver, input).await.unwrap();
        assert_eq!(pkg.car_id.as_deref(), Some(car.id.as_str()));
        assert_eq!(h.tours.list_by_driver(&h.driver.id).await.unwrap().len(), 1);
    }
}
