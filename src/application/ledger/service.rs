//! Wallet reads and manual ledger appends

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    Actor, DateRange, DomainResult, EntryType, LedgerEntry, LedgerTotals, RepositoryProvider,
    Role,
};

/// Settlement runs only inside `TourService::finish`.
pub struct LedgerService {
    repos: Arc<dyn RepositoryProvider>,
}

impl LedgerService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Append a single entry. Fails with `InvalidAmount` unless `amount > 0`.
    pub async fn record(
        &self,
        entry_type: EntryType,
        owner_role: Role,
        owner_id: &str,
        amount: i64,
        reservation_id: Option<String>,
    ) -> DomainResult<LedgerEntry> {
        let entry = LedgerEntry::new(entry_type, owner_role, owner_id, amount, reservation_id)?;
        self.repos.ledger().append(entry.clone()).await?;
        info!(
            entry_id = %entry.id,
            entry_type = %entry.entry_type,
            owner_id,
            amount,
            "Ledger entry recorded"
        );
        Ok(entry)
    }

    /// The caller's own entries, newest first.
    pub async fn list(
        &self,
        actor: &Actor,
        role: Role,
        range: DateRange,
    ) -> DomainResult<Vec<LedgerEntry>> {
        actor.require(role)?;
        self.repos.ledger().find_by_owner(role, &actor.id, range).await
    }

    /// Per-type counts and sums inside `range`, plus wallet figures for the
    /// caller. `held` is the balance at the end of the window.
    pub async fn totals(
        &self,
        actor: &Actor,
        role: Role,
        range: DateRange,
    ) -> DomainResult<LedgerTotals> {
        let history = self.list(actor, role, DateRange::default()).await?;
        Ok(LedgerTotals::tally_in(&history, range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::Harness;
    use crate::domain::DomainError;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn record_rejects_non_positive_amounts() {
        let h = Harness::new().await;
        assert!(matches!(
            h.ledger.record(EntryType::Credit, Role::Driver, &h.driver.id, 0, None).await,
            Err(DomainError::InvalidAmount(0))
        ));
        let e = h
            .ledger
            .record(EntryType::Credit, Role::Driver, &h.driver.id, 700, None)
            .await
            .unwrap();
        assert_eq!(e.amount, 700);
    }

    #[tokio::test]
    async fn totals_group_by_type_and_respect_range() {
        let h = Harness::new().await;
        for amount in [100, 250] {
            h.ledger
                .record(EntryType::Debit, Role::User, &h.user.id, amount, None)
                .await
                .unwrap();
        }

        let totals = h.ledger.totals(&h.user, Role::User, DateRange::default()).await.unwrap();
        assert_eq!(totals.count, 2);
        assert_eq!(totals.by_type[&EntryType::Debit].amount, 350);
        assert_eq!(totals.net_spend, 350);

        let future = DateRange::new(Some(Utc::now() + Duration::hours(1)), None).unwrap();
        let totals = h.ledger.totals(&h.user, Role::User, future).await.unwrap();
        assert_eq!(totals.count, 0);
    }

    #[tokio::test]
    async fn role_mismatch_is_forbidden() {
        let h = Harness::new().await;
        assert!(matches!(
            h.ledger.list(&h.user, Role::Driver, DateRange::default()).await,
            Err(DomainError::Forbidden(_))
        ));
    }
}
