//! Reservation lifecycle: create, pay, confirm, cancel.
//!
//! Every state change runs in one [`BookingTx`] whose first statement is the
//! guarded write, so the transaction owns the write lock before it reads
//! anything. The payment gateway is called before the transaction opens so
//! no database lock is held while waiting on the network.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::inventory::{release_seats, reserve_seats};
use super::settings::{BookingSettings, SettlementMode};
use crate::domain::{
    Actor, BookingTx, DomainError, DomainResult, EntryType, IntentRequest, LedgerEntry,
    PaymentGateway, PaymentIntent, RepositoryProvider, Reservation, ReservationStatus, Role,
    TourPackage, UnitOfWork,
};

/// Reads before a cancel are taken outside the transaction, so a lost
/// guard is retried against fresh state this many times.
const CANCEL_ATTEMPTS: u32 = 3;

pub struct ReservationService {
    repos: Arc<dyn RepositoryProvider>,
    uow: Arc<dyn UnitOfWork>,
    gateway: Arc<dyn PaymentGateway>,
    settings: BookingSettings,
}

impl ReservationService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        uow: Arc<dyn UnitOfWork>,
        gateway: Arc<dyn PaymentGateway>,
        settings: BookingSettings,
    ) -> Self {
        Self {
            repos,
            uow,
            gateway,
            settings,
        }
    }

    // ── Create ──────────────────────────────────────────────────

    /// Hold `quantity` seats and open a PENDING reservation priced server-side.
    pub async fn create(
        &self,
        actor: &Actor,
        package_id: &str,
        quantity: i32,
    ) -> DomainResult<Reservation> {
        actor.require(Role::User)?;

        let mut tx = self.uow.begin().await?;
        let package = reserve_seats(tx.as_mut(), package_id, quantity).await?;
        let reservation = Reservation::new(&package.id, &actor.id, quantity, package.price)?;
        tx.insert_reservation(&reservation).await?;
        tx.commit().await?;

        metrics::counter!("reservations_created_total").increment(1);
        info!(
            reservation_id = %reservation.id,
            package_id = %package.id,
            user_id = %actor.id,
            quantity,
            amount = reservation.amount,
            vacancies = package.vacancies,
            "Reservation created"
        );
        Ok(reservation)
    }

    // ── Payment ─────────────────────────────────────────────────

    /// Ask the gateway for an intent covering a PENDING reservation.
    pub async fn create_payment_intent(
        &self,
        actor: &Actor,
        reservation_id: &str,
    ) -> DomainResult<PaymentIntent> {
        actor.require(Role::User)?;
        let reservation = self.owned_reservation(actor, reservation_id).await?;
        match reservation.status() {
            ReservationStatus::Pending => {}
            ReservationStatus::Confirmed => {
                return Err(DomainError::InvalidTransition(format!(
                    "reservation {} is already paid",
                    reservation.id
                )))
            }
            ReservationStatus::Canceled => {
                return Err(DomainError::AlreadyCanceled(reservation.id))
            }
        }

        let request = IntentRequest {
            reservation_id: reservation.id.clone(),
            amount: reservation.amount,
            currency: self.settings.currency.clone(),
        };
        let intent = self
            .with_timeout(self.gateway.create_intent(&request))
            .await?;

        info!(
            reservation_id = %reservation.id,
            intent_id = %intent.id,
            gateway = self.gateway.name(),
            amount = intent.amount,
            "Payment intent created"
        );
        Ok(intent)
    }

    // ── Confirm ─────────────────────────────────────────────────

    /// PENDING → CONFIRMED once the gateway reports the intent paid.
    ///
    /// Confirming an already confirmed reservation returns it unchanged.
    pub async fn confirm(
        &self,
        actor: &Actor,
        reservation_id: &str,
        payment_intent_id: &str,
    ) -> DomainResult<Reservation> {
        actor.require(Role::User)?;
        let reservation = self.owned_reservation(actor, reservation_id).await?;
        match reservation.status() {
            ReservationStatus::Confirmed => return Ok(reservation),
            ReservationStatus::Canceled => {
                return Err(DomainError::AlreadyCanceled(reservation.id))
            }
            ReservationStatus::Pending => {}
        }

        let intent = match self
            .with_timeout(self.gateway.retrieve_intent(payment_intent_id))
            .await
        {
            Ok(intent) => intent,
            Err(e) => {
                metrics::counter!("payment_failures_total").increment(1);
                warn!(reservation_id, intent_id = payment_intent_id, error = %e, "Payment check failed");
                return Err(e);
            }
        };
        if let Err(e) = intent.verify_for(&reservation, &self.settings.currency) {
            metrics::counter!("payment_failures_total").increment(1);
            warn!(reservation_id, intent_id = payment_intent_id, error = %e, "Payment intent rejected");
            return Err(e);
        }

        let mut current = reservation;
        current.confirm(&intent.id, Utc::now())?;

        let mut tx = self.uow.begin().await?;
        if !tx
            .transition_reservation(&current, ReservationStatus::Pending)
            .await?
        {
            let now = load_reservation(tx.as_mut(), reservation_id).await?;
            return match now.status() {
                ReservationStatus::Confirmed => Ok(now),
                ReservationStatus::Canceled => Err(DomainError::AlreadyCanceled(now.id)),
                ReservationStatus::Pending => Err(changed_concurrently(&now)),
            };
        }
        let package = load_package(tx.as_mut(), &current.tour_package_id).await?;

        let driver_entry = match self.settings.settlement_mode {
            SettlementMode::Hold => EntryType::Pendant,
            SettlementMode::Immediate => EntryType::Credit,
        };
        // Free tours move no money
        if current.amount > 0 {
            let rid = Some(current.id.clone());
            let entries = [
                LedgerEntry::new(EntryType::Debit, Role::User, &current.user_id, current.amount, rid.clone())?,
                LedgerEntry::new(driver_entry, Role::Driver, &package.driver_id, current.amount, rid)?,
            ];
            tx.append_entries(&entries).await?;
        }
        tx.commit().await?;

        metrics::counter!("reservations_confirmed_total").increment(1);
        info!(
            reservation_id = %current.id,
            intent_id = %intent.id,
            amount = current.amount,
            driver_entry = %driver_entry,
            "Reservation confirmed"
        );
        Ok(current)
    }

    // ── Cancel ──────────────────────────────────────────────────

    /// PENDING | CONFIRMED → CANCELED, releasing seats and refunding
    /// anything already booked in the ledger.
    pub async fn cancel(&self, actor: &Actor, reservation_id: &str) -> DomainResult<Reservation> {
        let mut attempt = 0;
        let (mut tx, reservation, package, previous) = loop {
            attempt += 1;
            let mut reservation = self
                .repos
                .reservations()
                .find_by_id(reservation_id)
                .await?
                .ok_or_else(|| DomainError::not_found("Reservation", reservation_id))?;
            let package = self
                .repos
                .tour_packages()
                .find_by_id(&reservation.tour_package_id)
                .await?
                .ok_or_else(|| DomainError::not_found("TourPackage", reservation.tour_package_id.clone()))?;

            let allowed = match actor.role {
                Role::User => reservation.is_owned_by(&actor.id),
                Role::Driver => package.driver_id == actor.id,
            };
            if !allowed {
                return Err(DomainError::Forbidden(format!(
                    "reservation {} is not yours to cancel",
                    reservation.id
                )));
            }

            let previous = reservation.cancel(Utc::now())?;
            let mut tx = self.uow.begin().await?;
            if tx.transition_reservation(&reservation, previous).await? {
                break (tx, reservation, package, previous);
            }
            // Moved on since it was read: the next read reports AlreadyCanceled
            // or sees the confirmation that beat us.
            if attempt == CANCEL_ATTEMPTS {
                return Err(changed_concurrently(&reservation));
            }
        };

        let release = release_seats(tx.as_mut(), &package.id, reservation.vacancies_reserved).await?;

        let reversals = if previous == ReservationStatus::Confirmed {
            let rows = tx.entries_for_reservations(&[reservation.id.clone()]).await?;
            let reversals = refunds_for(&rows)?;
            tx.append_entries(&reversals).await?;
            reversals.len()
        } else {
            0
        };
        tx.commit().await?;

        metrics::counter!("reservations_canceled_total").increment(1);
        info!(
            reservation_id = %reservation.id,
            by = %actor.role,
            previous = %previous,
            vacancies = release.package().vacancies,
            reversals,
            "Reservation canceled"
        );
        Ok(reservation)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list_for_user(&self, actor: &Actor) -> DomainResult<Vec<Reservation>> {
        actor.require(Role::User)?;
        self.repos.reservations().find_by_user(&actor.id).await
    }

    /// Reservations on a package, visible to its driver only.
    pub async fn list_for_package(
        &self,
        actor: &Actor,
        package_id: &str,
    ) -> DomainResult<Vec<Reservation>> {
        actor.require(Role::Driver)?;
        let package = self
            .repos
            .tour_packages()
            .find_by_id(package_id)
            .await?
            .ok_or_else(|| DomainError::not_found("TourPackage", package_id))?;
        package.ensure_owned_by(&actor.id)?;
        self.repos.reservations().find_by_package(package_id).await
    }

    // ── Helpers ─────────────────────────────────────────────────

    async fn owned_reservation(&self, actor: &Actor, id: &str) -> DomainResult<Reservation> {
        let reservation = self
            .repos
            .reservations()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Reservation", id))?;
        if !reservation.is_owned_by(&actor.id) {
            return Err(DomainError::Forbidden(format!(
                "reservation {} belongs to another user",
                id
            )));
        }
        Ok(reservation)
    }

    async fn with_timeout<T>(
        &self,
        call: impl std::future::Future<Output = Result<T, crate::domain::GatewayError>>,
    ) -> DomainResult<T> {
        let limit = self.settings.gateway_timeout;
        match tokio::time::timeout(limit, call).await {
            Ok(result) => result.map_err(DomainError::from),
            Err(_) => Err(DomainError::PaymentTimeout(limit.as_secs())),
        }
    }
}

async fn load_reservation(tx: &mut dyn BookingTx, id: &str) -> DomainResult<Reservation> {
    tx.reservation(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Reservation", id))
}

async fn load_package(tx: &mut dyn BookingTx, id: &str) -> DomainResult<TourPackage> {
    tx.tour_package(id)
        .await?
        .ok_or_else(|| DomainError::not_found("TourPackage", id))
}

fn changed_concurrently(r: &Reservation) -> DomainError {
    DomainError::InvalidTransition(format!("reservation {} changed concurrently", r.id))
}

/// REVERSALs for a reservation's user DEBIT and driver earning.
///
/// The driver side offsets the settlement CREDIT when the hold was already
/// settled, the PENDANT otherwise. Rows that already carry a reversal are
/// skipped.
fn refunds_for(rows: &[LedgerEntry]) -> DomainResult<Vec<LedgerEntry>> {
    let reversed: HashSet<&str> = rows
        .iter()
        .filter(|e| e.entry_type == EntryType::Reversal)
        .filter_map(|e| e.related_entry_id.as_deref())
        .collect();
    let settled: HashSet<&str> = rows
        .iter()
        .filter(|e| e.entry_type == EntryType::Credit && e.offsets == Some(EntryType::Pendant))
        .filter_map(|e| e.related_entry_id.as_deref())
        .collect();

    rows.iter()
        .filter(|e| !reversed.contains(e.id.as_str()))
        .filter(|e| match e.entry_type {
            EntryType::Debit | EntryType::Credit => true,
            EntryType::Pendant => !settled.contains(e.id.as_str()),
            EntryType::Reversal => false,
        })
        .map(LedgerEntry::reversal)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::application::test_support::Harness;
    use crate::domain::DateRange;
    use crate::infrastructure::payment::{SimulatedGateway, SimulatedOutcome};

    #[tokio::test]
    async fn scenario_reserve_confirm_cancel() {
        let h = Harness::new().await;
        let pkg = h.package(10, 15000).await;

        let r = h.reservations.create(&h.user, &pkg.id, 3).await.unwrap();
        assert_eq!(r.status(), ReservationStatus::Pending);
        assert_eq!(r.amount, 45000);
        assert_eq!(h.vacancies(&pkg.id).await, 7);

        let confirmed = h.pay_and_confirm(&r).await.unwrap();
        assert_eq!(confirmed.status(), ReservationStatus::Confirmed);
        let rows = h.ledger_rows(&r.id).await;
        let types: Vec<_> = rows.iter().map(|e| (e.entry_type, e.owner_role)).collect();
        assert!(types.contains(&(EntryType::Debit, Role::User)));
        assert!(types.contains(&(EntryType::Pendant, Role::Driver)));
        assert_eq!(rows.len(), 2);

        let canceled = h.reservations.cancel(&h.user, &r.id).await.unwrap();
        assert_eq!(canceled.status(), ReservationStatus::Canceled);
        assert!(!canceled.confirmed);
        assert_eq!(h.vacancies(&pkg.id).await, 10);

        let rows = h.ledger_rows(&r.id).await;
        let reversals: Vec<_> = rows
            .iter()
            .filter(|e| e.entry_type == EntryType::Reversal)
            .collect();
        assert_eq!(reversals.len(), 2);
        assert!(reversals
            .iter()
            .any(|e| e.owner_role == Role::User && e.offsets == Some(EntryType::Debit)));
        assert!(reversals
            .iter()
            .any(|e| e.owner_role == Role::Driver && e.offsets == Some(EntryType::Pendant)));
        assert!(reversals.iter().all(|e| e.amount == 45000));
    }

    #[tokio::test]
    async fn scenario_over_capacity_changes_nothing() {
        let h = Harness::new().await;
        let pkg = h.package(2, 1000).await;

        let err = h.reservations.create(&h.user, &pkg.id, 3).await.unwrap_err();
        assert!(matches!(err, DomainError::InsufficientCapacity { .. }));
        assert_eq!(h.vacancies(&pkg.id).await, 2);
        assert!(h.reservations.list_for_user(&h.user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn second_cancel_is_rejected_without_side_effects() {
        let h = Harness::new().await;
        let pkg = h.package(5, 2000).await;
        let r = h.reservations.create(&h.user, &pkg.id, 2).await.unwrap();
        h.pay_and_confirm(&r).await.unwrap();
        h.reservations.cancel(&h.user, &r.id).await.unwrap();
        let rows_before = h.ledger_rows(&r.id).await.len();

        let err = h.reservations.cancel(&h.user, &r.id).await.unwrap_err();
        assert!(matches!(err, DomainError::AlreadyCanceled(_)));
        assert_eq!(h.vacancies(&pkg.id).await, 5);
        assert_eq!(h.ledger_rows(&r.id).await.len(), rows_before);
    }

    #[tokio::test]
    async fn pending_cancel_writes_no_ledger_rows() {
        let h = Harness::new().await;
        let pkg = h.package(5, 2000).await;
        let r = h.reservations.create(&h.user, &pkg.id, 1).await.unwrap();

        h.reservations.cancel(&h.driver, &r.id).await.unwrap();
        assert!(h.ledger_rows(&r.id).await.is_empty());
        assert_eq!(h.vacancies(&pkg.id).await, 5);
    }

    #[tokio::test]
    async fn only_owner_or_package_driver_may_cancel() {
        let h = Harness::new().await;
        let pkg = h.package(5, 2000).await;
        let r = h.reservations.create(&h.user, &pkg.id, 1).await.unwrap();

        let stranger = h.another_user().await;
        assert!(matches!(
            h.reservations.cancel(&stranger, &r.id).await,
            Err(DomainError::Forbidden(_))
        ));
        let other_driver = h.another_driver().await;
        assert!(matches!(
            h.reservations.cancel(&other_driver, &r.id).await,
            Err(DomainError::Forbidden(_))
        ));
        assert_eq!(h.vacancies(&pkg.id).await, 4);
    }

    #[tokio::test]
    async fn confirm_twice_is_idempotent() {
        let h = Harness::new().await;
        let pkg = h.package(5, 2000).await;
        let r = h.reservations.create(&h.user, &pkg.id, 1).await.unwrap();
        let intent = h.reservations.create_payment_intent(&h.user, &r.id).await.unwrap();

        h.reservations.confirm(&h.user, &r.id, &intent.id).await.unwrap();
        let again = h.reservations.confirm(&h.user, &r.id, &intent.id).await.unwrap();
        assert_eq!(again.status(), ReservationStatus::Confirmed);
        assert_eq!(h.ledger_rows(&r.id).await.len(), 2);
    }

    #[tokio::test]
    async fn declined_payment_leaves_reservation_pending() {
        let h = Harness::with_gateway(SimulatedGateway::new(SimulatedOutcome::Decline)).await;
        let pkg = h.package(5, 2000).await;
        let r = h.reservations.create(&h.user, &pkg.id, 1).await.unwrap();

        let err = h.pay_and_confirm(&r).await.unwrap_err();
        assert!(matches!(err, DomainError::PaymentFailed(_)));
        assert_eq!(h.reload(&r.id).await.status(), ReservationStatus::Pending);
        assert!(h.ledger_rows(&r.id).await.is_empty());
    }

    #[tokio::test]
    async fn unpaid_intent_is_rejected() {
        let h = Harness::with_gateway(SimulatedGateway::new(SimulatedOutcome::Pending)).await;
        let pkg = h.package(5, 2000).await;
        let r = h.reservations.create(&h.user, &pkg.id, 1).await.unwrap();

        assert!(matches!(
            h.pay_and_confirm(&r).await,
            Err(DomainError::PaymentFailed(_))
        ));
        assert_eq!(h.reload(&r.id).await.status(), ReservationStatus::Pending);
    }

    #[tokio::test]
    async fn intent_for_other_reservation_is_rejected() {
        let h = Harness::new().await;
        let pkg = h.package(5, 2000).await;
        let first = h.reservations.create(&h.user, &pkg.id, 1).await.unwrap();
        let second = h.reservations.create(&h.user, &pkg.id, 1).await.unwrap();
        let intent = h
            .reservations
            .create_payment_intent(&h.user, &first.id)
            .await
            .unwrap();

        assert!(matches!(
            h.reservations.confirm(&h.user, &second.id, &intent.id).await,
            Err(DomainError::PaymentFailed(_))
        ));
    }

    #[tokio::test]
    async fn gateway_timeout_leaves_reservation_pending() {
        let gateway = SimulatedGateway::default().with_delay(Duration::from_millis(200));
        let h = Harness::with_settings(
            gateway,
            BookingSettings {
                gateway_timeout: Duration::from_millis(20),
                ..BookingSettings::default()
            },
        )
        .await;
        let pkg = h.package(5, 2000).await;
        let r = h.reservations.create(&h.user, &pkg.id, 1).await.unwrap();

        let err = h.pay_and_confirm(&r).await.unwrap_err();
        assert!(matches!(err, DomainError::PaymentTimeout(_)));
        assert_eq!(h.reload(&r.id).await.status(), ReservationStatus::Pending);
    }

    #[tokio::test]
    async fn immediate_mode_credits_at_confirmation() {
        let h = Harness::with_settings(
            SimulatedGateway::default(),
            BookingSettings {
                settlement_mode: SettlementMode::Immediate,
                ..BookingSettings::default()
            },
        )
        .await;
        let pkg = h.package(5, 2000).await;
        let r = h.reservations.create(&h.user, &pkg.id, 2).await.unwrap();
        h.pay_and_confirm(&r).await.unwrap();

        let totals = h
            .ledger
            .totals(&h.driver, Role::Driver, DateRange::default())
            .await
            .unwrap();
        assert_eq!(totals.realized, 4000);
        assert_eq!(totals.held, 0);

        h.reservations.cancel(&h.driver, &r.id).await.unwrap();
        let totals = h
            .ledger
            .totals(&h.driver, Role::Driver, DateRange::default())
            .await
            .unwrap();
        assert_eq!(totals.realized, 0);
    }

    #[tokio::test]
    async fn drivers_cannot_reserve_and_confirm_after_cancel_fails() {
        let h = Harness::new().await;
        let pkg = h.package(5, 2000).await;
        assert!(matches!(
            h.reservations.create(&h.driver, &pkg.id, 1).await,
            Err(DomainError::Forbidden(_))
        ));

        let r = h.reservations.create(&h.user, &pkg.id, 1).await.unwrap();
        let intent = h.reservations.create_payment_intent(&h.user, &r.id).await.unwrap();
        h.reservations.cancel(&h.user, &r.id).await.unwrap();
        assert!(matches!(
            h.reservations.confirm(&h.user, &r.id, &intent.id).await,
            Err(DomainError::AlreadyCanceled(_))
        ));
    }

    #[tokio::test]
    async fn package_driver_sees_its_reservations() {
        let h = Harness::new().await;
        let pkg = h.package(5, 2000).await;
        h.reservations.create(&h.user, &pkg.id, 1).await.unwrap();

        assert_eq!(
            h.reservations.list_for_package(&h.driver, &pkg.id).await.unwrap().len(),
            1
        );
        let other = h.another_driver().await;
        assert!(matches!(
            h.reservations.list_for_package(&other, &pkg.id).await,
            Err(DomainError::Forbidden(_))
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_cancels_have_one_winner() {
        let h = Harness::on_file().await;
        let pkg = h.package(5, 2000).await;
        let r = h.reservations.create(&h.user, &pkg.id, 2).await.unwrap();
        h.pay_and_confirm(&r).await.unwrap();

        let (a, b, c, d) = tokio::join!(
            h.reservations.cancel(&h.user, &r.id),
            h.reservations.cancel(&h.user, &r.id),
            h.reservations.cancel(&h.driver, &r.id),
            h.reservations.cancel(&h.driver, &r.id)
        );
        let results = [a, b, c, d];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        for loser in results.iter().filter_map(|r| r.as_ref().err()) {
            assert!(matches!(loser, DomainError::AlreadyCanceled(_)), "{loser:?}");
        }

        assert_eq!(h.vacancies(&pkg.id).await, 5);
        let reversals = h
            .ledger_rows(&r.id)
            .await
            .into_iter()
            .filter(|e| e.entry_type == EntryType::Reversal)
            .count();
        assert_eq!(reversals, 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn confirm_racing_cancel_ends_canceled_and_balanced() {
        let h = Harness::on_file().await;
        let pkg = h.package(5, 2000).await;
        let r = h.reservations.create(&h.user, &pkg.id, 1).await.unwrap();
        let intent = h.reservations.create_payment_intent(&h.user, &r.id).await.unwrap();

        let (confirmed, canceled) = tokio::join!(
            h.reservations.confirm(&h.user, &r.id, &intent.id),
            h.reservations.cancel(&h.user, &r.id)
        );
        canceled.unwrap();
        match confirmed {
            Ok(_) | Err(DomainError::AlreadyCanceled(_)) => {}
            Err(e) => panic!("unexpected confirm error: {e:?}"),
        }

        assert_eq!(h.reload(&r.id).await.status(), ReservationStatus::Canceled);
        assert_eq!(h.vacancies(&pkg.id).await, 5);
        let user_totals = h
            .ledger
            .totals(&h.user, Role::User, DateRange::default())
            .await
            .unwrap();
        assert_eq!(user_totals.net_spend, 0);
        let driver_totals = h
            .ledger
            .totals(&h.driver, Role::Driver, DateRange::default())
            .await
            .unwrap();
        assert_eq!(driver_totals.held, 0);
        assert_eq!(driver_totals.realized, 0);
    }

    #[test]
    fn refunds_skip_reversed_and_settled_rows() {
        let debit = LedgerEntry::new(EntryType::Debit, Role::User, "u", 100, Some("r".into())).unwrap();
        let hold = LedgerEntry::new(EntryType::Pendant, Role::Driver, "d", 100, Some("r".into())).unwrap();
        let credit = hold.settlement().unwrap();

        let refunds = refunds_for(&[debit.clone(), hold.clone(), credit.clone()]).unwrap();
        assert_eq!(refunds.len(), 2);
        assert!(refunds
            .iter()
            .any(|e| e.related_entry_id.as_deref() == Some(credit.id.as_str())));

        let already = debit.reversal().unwrap();
        let refunds = refunds_for(&[debit, hold, already]).unwrap();
        assert_eq!(refunds.len(), 1);
        assert_eq!(refunds[0].offsets, Some(EntryType::Pendant));
    }
}
