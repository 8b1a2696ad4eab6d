//! SeaORM implementation of LedgerRepository
//!
//! Insert-only. There is no update or delete path for ledger rows.

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use super::mapping::{db_err, entry_from_model, entry_to_active, insert_err, role_to_db};
use crate::domain::account::Role;
use crate::domain::ledger::{DateRange, LedgerEntry, LedgerRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::ledger_entry;

pub struct SeaOrmLedgerRepository {
    db: DatabaseConnection,
}

impl SeaOrmLedgerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LedgerRepository for SeaOrmLedgerRepository {
    async fn append(&self, entry: LedgerEntry) -> DomainResult<()> {
        debug!(
            "Appending {} {} for {} {}",
            entry.entry_type, entry.amount, entry.owner_role, entry.owner_id
        );
        entry_to_active(&entry)
            .insert(&self.db)
            .await
            .map_err(insert_err("ledger entry"))?;
        Ok(())
    }

    async fn find_by_owner(
        &self,
        role: Role,
        owner_id: &str,
        range: DateRange,
    ) -> DomainResult<Vec<LedgerEntry>> {
        let mut query = ledger_entry::Entity::find()
            .filter(ledger_entry::Column::OwnerRole.eq(role_to_db(role)))
            .filter(ledger_entry::Column::OwnerId.eq(owner_id));
        if let Some(from) = range.from {
            query = query.filter(ledger_entry::Column::CreatedAt.gte(from));
        }
        if let Some(to) = range.to {
            query = query.filter(ledger_entry::Column::CreatedAt.lte(to));
        }

        let models = query
            .order_by_desc(ledger_entry::Column::CreatedAt)
            .order_by_desc(ledger_entry::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entry_from_model).collect())
    }

    async fn find_by_reservation(&self, reservation_id: &str) -> DomainResult<Vec<LedgerEntry>> {
        let models = ledger_entry::Entity::find()
            .filter(ledger_entry::Column::ReservationId.eq(reservation_id))
            .order_by_asc(ledger_entry::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entry_from_model).collect())
    }
}
