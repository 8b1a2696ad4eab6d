//! Create tour_packages table
//!
//! `vacancies` is the live seat counter; the CHECK keeps it inside
//! `0..=seats_available` even if an update slips past its guard.

use sea_orm_migration::prelude::*;

use super::m20240601_000001_create_accounts::Accounts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TourPackages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TourPackages::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TourPackages::DriverId).string().not_null())
                    .col(ColumnDef::new(TourPackages::CarId).string())
                    .col(ColumnDef::new(TourPackages::TouristPointId).string())
                    .col(ColumnDef::new(TourPackages::Title).string().not_null())
                    .col(ColumnDef::new(TourPackages::OriginLocal).string().not_null())
                    .col(ColumnDef::new(TourPackages::DestinyLocal).string().not_null())
                    .col(
                        ColumnDef::new(TourPackages::DateTour)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TourPackages::Price).big_integer().not_null())
                    .col(
                        ColumnDef::new(TourPackages::SeatsAvailable)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TourPackages::Vacancies)
                            .integer()
                            .not_null()
                            .check(
                                Expr::col(TourPackages::Vacancies)
                                    .gte(0)
                                    .and(
                                        Expr::col(TourPackages::Vacancies)
                                            .lte(Expr::col(TourPackages::SeatsAvailable)),
                                    ),
                            ),
                    )
                    .col(ColumnDef::new(TourPackages::TourType).string_len(20).not_null())
                    .col(
                        ColumnDef::new(TourPackages::IsRunning)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(TourPackages::IsFinalised)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(TourPackages::StartDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(TourPackages::EndDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(TourPackages::ImageUrl).string())
                    .col(
                        ColumnDef::new(TourPackages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tour_packages_driver")
                            .from(TourPackages::Table, TourPackages::DriverId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tour_packages_driver")
                    .table(TourPackages::Table)
                    .col(TourPackages::DriverId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tour_packages_date")
                    .table(TourPackages::Table)
                    .col(TourPackages::DateTour)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TourPackages::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum TourPackages {
    Table,
    Id,
    DriverId,
    CarId,
    TouristPointId,
    Title,
    OriginLocal,
    DestinyLocal,
    DateTour,
    Price,
    SeatsAvailable,
    Vacancies,
    TourType,
    IsRunning,
    IsFinalised,
    StartDate,
    EndDate,
    ImageUrl,
    CreatedAt,
}
