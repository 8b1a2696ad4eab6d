//! Create cars and tourist_points tables

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
                    .table(Cars::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Cars::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Cars::DriverId).string().not_null())
                    .col(ColumnDef::new(Cars::Model).string().not_null())
                    .col(ColumnDef::new(Cars::Plate).string().not_null())
                    .col(ColumnDef::new(Cars::Capacity).integer().not_null())
                    .col(
                        ColumnDef::new(Cars::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cars_driver")
                            .from(Cars::Table, Cars::DriverId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cars_driver")
                    .table(Cars::Table)
                    .col(Cars::DriverId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TouristPoints::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TouristPoints::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TouristPoints::DriverId).string().not_null())
                    .col(ColumnDef::new(TouristPoints::Name).string().not_null())
                    .col(ColumnDef::new(TouristPoints::City).string().not_null())
                    .col(ColumnDef::new(TouristPoints::Description).text())
                    .col(
                        ColumnDef::new(TouristPoints::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tourist_points_driver")
                            .from(TouristPoints::Table, TouristPoints::DriverId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tourist_points_driver")
                    .table(TouristPoints::Table)
                    .col(TouristPoints::DriverId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TouristPoints::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cars::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Cars {
    Table,
    Id,
    DriverId,
    Model,
    Plate,
    Capacity,
    CreatedAt,
}

#[derive(Iden)]
pub enum TouristPoints {
    Table,
    Id,
    DriverId,
    Name,
    City,
    Description,
    CreatedAt,
}
