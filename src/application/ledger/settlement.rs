//! PENDANT → CREDIT conversion for a finished tour

use std::collections::HashSet;

use tracing::info;

use crate::domain::{BookingTx, DomainResult, EntryType, LedgerEntry};

/// Append one CREDIT per unsettled, unreversed PENDANT held for the
/// package's confirmed reservations. Safe to run more than once.
pub async fn settlement_conversion(
    tx: &mut dyn BookingTx,
    package_id: &str,
) -> DomainResult<Vec<LedgerEntry>> {
    let reservations = tx.confirmed_reservations_for_package(package_id).await?;
    let ids: Vec<String> = reservations.into_iter().map(|r| r.id).collect();
    let rows = tx.entries_for_reservations(&ids).await?;

    let closed: HashSet<&str> = rows
        .iter()
        .filter(|e| {
            e.entry_type == EntryType::Reversal
                || (e.entry_type == EntryType::Credit && e.offsets == Some(EntryType::Pendant))
        })
        .filter_map(|e| e.related_entry_id.as_deref())
        .collect();

    let credits = rows
        .iter()
        .filter(|e| e.entry_type == EntryType::Pendant && !closed.contains(e.id.as_str()))
        .map(LedgerEntry::settlement)
        .collect::<DomainResult<Vec<_>>>()?;

    tx.append_entries(&credits).await?;

    let amount: i64 = credits.iter().map(|c| c.amount).sum();
    info!(
        package_id,
        reservations = ids.len(),
        credits = credits.len(),
        amount,
        "Settlement conversion"
    );
    Ok(credits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::Harness;

    #[tokio::test]
    async fn second_run_after_finish_settles_nothing() {
        let h = Harness::new().await;
        let pkg = h.package(4, 1500).await;
        let r = h.reservations.create(&h.user, &pkg.id, 2).await.unwrap();
        h.pay_and_confirm(&r).await.unwrap();
        h.tours.start(&h.driver, &pkg.id).await.unwrap();

        let finished = h.tours.finish(&h.driver, &pkg.id).await.unwrap();
        assert_eq!(finished.settled.len(), 1);
        assert_eq!(finished.settled[0].amount, 3000);

        let mut tx = h.uow.begin().await.unwrap();
        let again = settlement_conversion(tx.as_mut(), &pkg.id).await.unwrap();
        tx.commit().await.unwrap();
        assert!(again.is_empty());
    }
}
