pub mod entities;
pub mod migrator;
pub mod repositories;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./tour_booking.db?mode=rwc")
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./tour_booking.db?mode=rwc".to_string(),
            max_connections: 8,
        }
    }
}

impl DatabaseConfig {
    /// Create config for SQLite
    pub fn sqlite(path: &str) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path),
            ..Self::default()
        }
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!("Connecting to database: {}", config.url);
    let mut opts = ConnectOptions::new(config.url.clone());
    opts.max_connections(config.max_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    let db = Database::connect(opts).await?;
    info!("Database connected successfully");
    Ok(db)
}

/// Fresh migrated in-memory SQLite database.
///
/// One connection only, since every pooled `sqlite::memory:` connection
/// would open its own empty database.
#[cfg(test)]
pub(crate) async fn memory_db() -> DatabaseConnection {
    use migrator::{Migrator, MigratorTrait};

    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.expect("connect sqlite memory");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

/// Migrated SQLite file at `path` behind the default multi-connection pool,
/// for tests where requests must really run side by side.
#[cfg(test)]
pub(crate) async fn file_db(path: &std::path::Path) -> DatabaseConnection {
    use migrator::{Migrator, MigratorTrait};

    let config = DatabaseConfig::sqlite(&path.to_string_lossy());
    let db = init_database(&config).await.expect("open sqlite file");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::{Account, Role};
    use crate::domain::ledger::{DateRange, EntryType, LedgerEntry};
    use crate::domain::repositories::{RepositoryProvider, UnitOfWork};
    use crate::domain::reservation::{Reservation, ReservationStatus};
    use crate::domain::tour_package::model::tests::sample_input;
    use crate::domain::tour_package::{TourLifecycle, TourPackage};
    use crate::domain::DomainError;
    use repositories::{SeaOrmRepositoryProvider, SeaOrmUnitOfWork};

    async fn seeded() -> (DatabaseConnection, SeaOrmRepositoryProvider, Account, Account, TourPackage) {
        let db = memory_db().await;
        let repos = SeaOrmRepositoryProvider::new(db.clone());
        let driver = Account::new(Role::Driver, "Dan", "dan@tours.com", None, "h");
        let user = Account::new(Role::User, "Uma", "uma@mail.com", None, "h");
        repos.accounts().save(driver.clone()).await.unwrap();
        repos.accounts().save(user.clone()).await.unwrap();
        let pkg = TourPackage::new(sample_input(&driver.id, 3, 1000)).unwrap();
        repos.tour_packages().save(pkg.clone()).await.unwrap();
        (db, repos, driver, user, pkg)
    }

    #[tokio::test]
    async fn duplicate_email_per_role_conflicts() {
        let (_db, repos, _driver, _user, _pkg) = seeded().await;
        let again = Account::new(Role::Driver, "Other", "DAN@tours.com", None, "h");
        assert!(matches!(
            repos.accounts().save(again).await,
            Err(DomainError::Conflict(_))
        ));
        // Same email under the other role is a separate account
        let as_user = Account::new(Role::User, "Dan", "dan@tours.com", None, "h");
        assert!(repos.accounts().save(as_user).await.is_ok());
        let found = repos
            .accounts()
            .find_by_email("Dan@Tours.com", Role::Driver)
            .await
            .unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn guarded_decrement_never_oversells() {
        let (db, repos, _driver, _user, pkg) = seeded().await;
        let uow = SeaOrmUnitOfWork::new(db);

        let mut tx = uow.begin().await.unwrap();
        assert!(tx.decrement_vacancies(&pkg.id, 2).await.unwrap());
        assert!(!tx.decrement_vacancies(&pkg.id, 2).await.unwrap());
        assert!(tx.decrement_vacancies(&pkg.id, 1).await.unwrap());
        tx.commit().await.unwrap();

        let stored = repos.tour_packages().find_by_id(&pkg.id).await.unwrap().unwrap();
        assert_eq!(stored.vacancies, 0);
    }

    #[tokio::test]
    async fn increment_stops_at_capacity() {
        let (db, repos, _driver, _user, pkg) = seeded().await;
        let uow = SeaOrmUnitOfWork::new(db);

        let mut tx = uow.begin().await.unwrap();
        assert!(!tx.increment_vacancies(&pkg.id, 1).await.unwrap());
        assert!(tx.decrement_vacancies(&pkg.id, 1).await.unwrap());
        assert!(tx.increment_vacancies(&pkg.id, 1).await.unwrap());
        tx.commit().await.unwrap();

        let stored = repos.tour_packages().find_by_id(&pkg.id).await.unwrap().unwrap();
        assert_eq!(stored.vacancies, stored.seats_available);
    }

    #[tokio::test]
    async fn dropped_transaction_rolls_back() {
        let (db, repos, _driver, user, pkg) = seeded().await;
        let uow = SeaOrmUnitOfWork::new(db);

        {
            let mut tx = uow.begin().await.unwrap();
            tx.decrement_vacancies(&pkg.id, 2).await.unwrap();
            let r = Reservation::new(&pkg.id, &user.id, 2, pkg.price).unwrap();
            tx.insert_reservation(&r).await.unwrap();
        }

        let stored = repos.tour_packages().find_by_id(&pkg.id).await.unwrap().unwrap();
        assert_eq!(stored.vacancies, 3);
        assert!(repos.reservations().find_by_user(&user.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn lifecycle_update_checks_expected_state() {
        let (db, repos, _driver, _user, mut pkg) = seeded().await;
        let uow = SeaOrmUnitOfWork::new(db);

        pkg.start(chrono::Utc::now()).unwrap();
        let mut tx = uow.begin().await.unwrap();
        assert!(!tx.update_lifecycle(&pkg, TourLifecycle::Running).await.unwrap());
        assert!(tx.update_lifecycle(&pkg, TourLifecycle::Scheduled).await.unwrap());
        assert!(!tx.decrement_vacancies(&pkg.id, 1).await.unwrap());
        tx.commit().await.unwrap();

        let stored = repos.tour_packages().find_by_id(&pkg.id).await.unwrap().unwrap();
        assert!(stored.is_running);
        assert!(stored.start_date.is_some());
    }

    #[tokio::test]
    async fn reservation_transition_and_ledger_queries() {
        let (db, repos, driver, user, pkg) = seeded().await;
        let uow = SeaOrmUnitOfWork::new(db);

        let mut r = Reservation::new(&pkg.id, &user.id, 1, pkg.price).unwrap();
        let mut tx = uow.begin().await.unwrap();
        tx.insert_reservation(&r).await.unwrap();
        r.confirm("pi_1", chrono::Utc::now()).unwrap();
        assert!(tx
            .transition_reservation(&r, ReservationStatus::Pending)
            .await
            .unwrap());
        assert!(!tx
            .transition_reservation(&r, ReservationStatus::Pending)
            .await
            .unwrap());

        let debit =
            LedgerEntry::new(EntryType::Debit, Role::User, &user.id, r.amount, Some(r.id.clone()))
                .unwrap();
        let hold = LedgerEntry::new(
            EntryType::Pendant,
            Role::Driver,
            &driver.id,
            r.amount,
            Some(r.id.clone()),
        )
        .unwrap();
        tx.append_entries(&[debit, hold.clone()]).await.unwrap();

        let confirmed = tx.confirmed_reservations_for_package(&pkg.id).await.unwrap();
        assert_eq!(confirmed.len(), 1);
        let rows = tx.entries_for_reservations(&[r.id.clone()]).await.unwrap();
        assert_eq!(rows.len(), 2);

        // A second settlement of the same hold is rejected by the unique index
        let credit = hold.settlement().unwrap();
        let dup = hold.settlement().unwrap();
        tx.append_entries(&[credit]).await.unwrap();
        assert!(matches!(
            tx.append_entries(&[dup]).await,
            Err(DomainError::Conflict(_))
        ));
        tx.commit().await.unwrap();

        let mine = repos
            .ledger()
            .find_by_owner(Role::Driver, &driver.id, DateRange::default())
            .await
            .unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(
            repos.reservations().find_by_id(&r.id).await.unwrap().unwrap().status(),
            ReservationStatus::Confirmed
        );
    }

    #[tokio::test]
    async fn open_packages_exclude_running_and_full() {
        let (db, repos, driver, _user, pkg) = seeded().await;
        let full = TourPackage::new(sample_input(&driver.id, 1, 500)).unwrap();
        repos.tour_packages().save(full.clone()).await.unwrap();

        let uow = SeaOrmUnitOfWork::new(db);
        let mut tx = uow.begin().await.unwrap();
        tx.decrement_vacancies(&full.id, 1).await.unwrap();
        tx.commit().await.unwrap();

        let page = repos.tour_packages().find_open(1, 10).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id, pkg.id);
    }
}
