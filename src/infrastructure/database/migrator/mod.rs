//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_accounts;
mod m20240601_000002_create_fleet;
mod m20240601_000003_create_tour_packages;
mod m20240601_000004_create_reservations;
mod m20240601_000005_create_ledger_entries;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_accounts::Migration),
            Box::new(m20240601_000002_create_fleet::Migration),
            Box::new(m20240601_000003_create_tour_packages::Migration),
            Box::new(m20240601_000004_create_reservations::Migration),
            Box::new(m20240601_000005_create_ledger_entries::Migration),
        ]
    }
}
