//! Create reservations table

use sea_orm_migration::prelude::*;

use super::m20240601_000001_create_accounts::Accounts;
use super::m20240601_000003_create_tour_packages::TourPackages;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reservations::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Reservations::TourPackageId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Reservations::UserId).string().not_null())
                    .col(
                        ColumnDef::new(Reservations::VacanciesReserved)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Reservations::Amount).big_integer().not_null())
                    .col(
                        ColumnDef::new(Reservations::Confirmed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Reservations::Canceled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Reservations::PaymentReference).string())
                    .col(
                        ColumnDef::new(Reservations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Reservations::ConfirmedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Reservations::CanceledAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservations_tour_package")
                            .from(Reservations::Table, Reservations::TourPackageId)
                            .to(TourPackages::Table, TourPackages::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservations_user")
                            .from(Reservations::Table, Reservations::UserId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_tour_package")
                    .table(Reservations::Table)
                    .col(Reservations::TourPackageId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_user")
                    .table(Reservations::Table)
                    .col(Reservations::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Reservations {
    Table,
    Id,
    TourPackageId,
    UserId,
    VacanciesReserved,
    Amount,
    Confirmed,
    Canceled,
    PaymentReference,
    CreatedAt,
    ConfirmedAt,
    CanceledAt,
}
