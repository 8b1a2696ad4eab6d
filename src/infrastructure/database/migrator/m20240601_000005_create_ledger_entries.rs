//! Create ledger_entries table

use sea_orm_migration::prelude::*;

use super::m20240601_000004_create_reservations::Reservations;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LedgerEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LedgerEntries::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LedgerEntries::EntryType).string_len(16).not_null())
                    .col(
                        ColumnDef::new(LedgerEntries::Amount)
                            .big_integer()
                            .not_null()
                            .check(Expr::col(LedgerEntries::Amount).gt(0)),
                    )
                    .col(ColumnDef::new(LedgerEntries::OwnerId).string().not_null())
                    .col(ColumnDef::new(LedgerEntries::OwnerRole).string_len(20).not_null())
                    .col(ColumnDef::new(LedgerEntries::ReservationId).string())
                    .col(ColumnDef::new(LedgerEntries::RelatedEntryId).string())
                    .col(ColumnDef::new(LedgerEntries::Offsets).string_len(16))
                    .col(
                        ColumnDef::new(LedgerEntries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ledger_entries_reservation")
                            .from(LedgerEntries::Table, LedgerEntries::ReservationId)
                            .to(Reservations::Table, Reservations::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ledger_entries_owner")
                    .table(LedgerEntries::Table)
                    .col(LedgerEntries::OwnerRole)
                    .col(LedgerEntries::OwnerId)
                    .col(LedgerEntries::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ledger_entries_reservation")
                    .table(LedgerEntries::Table)
                    .col(LedgerEntries::ReservationId)
                    .to_owned(),
            )
            .await?;

        // One settlement or reversal per source row
        manager
            .create_index(
                Index::create()
                    .name("idx_ledger_entries_related_type")
                    .table(LedgerEntries::Table)
                    .col(LedgerEntries::RelatedEntryId)
                    .col(LedgerEntries::EntryType)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LedgerEntries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum LedgerEntries {
    Table,
    Id,
    EntryType,
    Amount,
    OwnerId,
    OwnerRole,
    ReservationId,
    RelatedEntryId,
    Offsets,
    CreatedAt,
}
