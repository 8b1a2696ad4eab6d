//! Ledger repository interface

use async_trait::async_trait;

use super::model::{DateRange, LedgerEntry};
use crate::domain::account::Role;
use crate::domain::DomainResult;

#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Append one row outside of a booking transaction
    async fn append(&self, entry: LedgerEntry) -> DomainResult<()>;

    /// Rows owned by `(role, owner_id)` inside `range`, newest first
    async fn find_by_owner(
        &self,
        role: Role,
        owner_id: &str,
        range: DateRange,
    ) -> DomainResult<Vec<LedgerEntry>>;

    /// Rows tied to a reservation, oldest first
    async fn find_by_reservation(&self, reservation_id: &str) -> DomainResult<Vec<LedgerEntry>>;
}
