//! Service wiring over a fresh database for tests: in-memory by default,
//! a pooled SQLite file when requests have to race.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;

use super::booking::{BookingSettings, InventoryService, PublishPackage, ReservationService, TourService};
use super::fleet::FleetService;
use super::identity::AccountService;
use super::ledger::LedgerService;
use crate::domain::{
    Account, Actor, DomainResult, LedgerEntry, RepositoryProvider, Reservation, Role, TourPackage,
    TourType, UnitOfWork,
};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::{file_db, memory_db};
use crate::infrastructure::database::repositories::{SeaOrmRepositoryProvider, SeaOrmUnitOfWork};
use crate::infrastructure::payment::SimulatedGateway;

pub(crate) struct Harness {
    pub repos: Arc<dyn RepositoryProvider>,
    pub uow: Arc<dyn UnitOfWork>,
    pub accounts: AccountService,
    pub fleet: FleetService,
    pub tours: TourService,
    pub reservations: ReservationService,
    pub ledger: LedgerService,
    pub inventory: InventoryService,
    pub driver: Actor,
    pub user: Actor,
    scratch: Option<PathBuf>,
}

impl Drop for Harness {
    fn drop(&mut self) {
        if let Some(dir) = &self.scratch {
            let _ = std::fs::remove_dir_all(dir);
        }
    }
}

impl Harness {
    pub async fn new() -> Self {
        Self::with_gateway(SimulatedGateway::default()).await
    }

    pub async fn with_gateway(gateway: SimulatedGateway) -> Self {
        Self::with_settings(gateway, BookingSettings::default()).await
    }

    pub async fn with_settings(gateway: SimulatedGateway, settings: BookingSettings) -> Self {
        Self::build(memory_db().await, None, gateway, settings).await
    }

    /// Services over a SQLite file with the production pool size.
    pub async fn on_file() -> Self {
        let dir = std::env::temp_dir().join(format!("tour-booking-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let db = file_db(&dir.join("booking.db")).await;
        Self::build(db, Some(dir), SimulatedGateway::default(), BookingSettings::default()).await
    }

    async fn build(
        db: DatabaseConnection,
        scratch: Option<PathBuf>,
        gateway: SimulatedGateway,
        settings: BookingSettings,
    ) -> Self {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        let uow: Arc<dyn UnitOfWork> = Arc::new(SeaOrmUnitOfWork::new(db));

        let jwt = JwtConfig {
            secret: "test-secret".into(),
            ..JwtConfig::default()
        };

        let mut h = Self {
            accounts: AccountService::new(repos.clone(), jwt, 4),
            fleet: FleetService::new(repos.clone()),
            tours: TourService::new(repos.clone(), uow.clone()),
            reservations: ReservationService::new(
                repos.clone(),
                uow.clone(),
                Arc::new(gateway),
                settings,
            ),
            ledger: LedgerService::new(repos.clone()),
            inventory: InventoryService::new(uow.clone()),
            repos,
            uow,
            driver: Actor::driver(""),
            user: Actor::user(""),
            scratch,
        };
        h.driver = h.another_driver().await;
        h.user = h.another_user().await;
        h
    }

    async fn account(&self, role: Role) -> Actor {
        let email = format!("{}@{}.test", uuid::Uuid::new_v4(), role);
        let account = Account::new(role, "Test", email, None, "not-a-hash");
        self.repos.accounts().save(account.clone()).await.unwrap();
        Actor::new(account.id, role)
    }

    pub async fn another_user(&self) -> Actor {
        self.account(Role::User).await
    }

    pub async fn another_driver(&self) -> Actor {
        self.account(Role::Driver).await
    }

    pub fn publish_input(seats: i32, price: i64) -> PublishPackage {
        PublishPackage {
            car_id: None,
            tourist_point_id: None,
            title: "Passeio de buggy".into(),
            origin_local: "Natal".into(),
            destiny_local: "Genipabu".into(),
            date_tour: Utc::now() + Duration::days(2),
            price,
            seats_available: seats,
            tour_type: TourType::Buggy,
            image_url: None,
        }
    }

    /// A scheduled package owned by `self.driver`
    pub async fn package(&self, seats: i32, price: i64) -> TourPackage {
        self.tours
            .publish(&self.driver, Self::publish_input(seats, price))
            .await
            .unwrap()
    }

    pub async fn vacancies(&self, package_id: &str) -> i32 {
        self.tours.get(package_id).await.unwrap().vacancies
    }

    pub async fn reload(&self, reservation_id: &str) -> Reservation {
        self.repos
            .reservations()
            .find_by_id(reservation_id)
            .await
            .unwrap()
            .unwrap()
    }

    pub async fn ledger_rows(&self, reservation_id: &str) -> Vec<LedgerEntry> {
        self.repos
            .ledger()
            .find_by_reservation(reservation_id)
            .await
            .unwrap()
    }

    /// Create an intent for `r` and confirm with it, as the owning user would.
    pub async fn pay_and_confirm(&self, r: &Reservation) -> DomainResult<Reservation> {
        let owner = Actor::user(r.user_id.clone());
        let intent = self.reservations.create_payment_intent(&owner, &r.id).await?;
        self.reservations.confirm(&owner, &r.id, &intent.id).await
    }
}
