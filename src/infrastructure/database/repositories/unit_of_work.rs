//! SeaORM implementation of UnitOfWork / BookingTx
//!
//! Seat counters and state flags are written with guarded `UPDATE ... WHERE`
//! statements so two concurrent bookings can never both pass a stale check.

use async_trait::async_trait;
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};

use super::mapping::{
    db_err, entry_from_model, entry_to_active, insert_err, package_from_model,
    reservation_from_model, reservation_to_active,
};
use crate::domain::ledger::LedgerEntry;
use crate::domain::repositories::{BookingTx, UnitOfWork};
use crate::domain::reservation::{Reservation, ReservationStatus};
use crate::domain::tour_package::{TourLifecycle, TourPackage};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{ledger_entry, reservation, tour_package};

pub struct SeaOrmUnitOfWork {
    db: DatabaseConnection,
}

impl SeaOrmUnitOfWork {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UnitOfWork for SeaOrmUnitOfWork {
    async fn begin(&self) -> DomainResult<Box<dyn BookingTx>> {
        let txn = self.db.begin().await.map_err(db_err)?;
        Ok(Box::new(SeaOrmBookingTx { txn }))
    }
}

/// Open transaction. Rolled back by SeaORM when dropped uncommitted.
pub struct SeaOrmBookingTx {
    txn: DatabaseTransaction,
}

#[async_trait]
impl BookingTx for SeaOrmBookingTx {
    async fn tour_package(&mut self, id: &str) -> DomainResult<Option<TourPackage>> {
        let model = tour_package::Entity::find_by_id(id)
            .one(&self.txn)
            .await
            .map_err(db_err)?;
        Ok(model.map(package_from_model))
    }

    async fn decrement_vacancies(&mut self, package_id: &str, qty: i32) -> DomainResult<bool> {
        let result = tour_package::Entity::update_many()
            .col_expr(
                tour_package::Column::Vacancies,
                Expr::col(tour_package::Column::Vacancies).sub(qty),
            )
            .filter(tour_package::Column::Id.eq(package_id))
            .filter(tour_package::Column::Vacancies.gte(qty))
            .filter(tour_package::Column::IsRunning.eq(false))
            .filter(tour_package::Column::IsFinalised.eq(false))
            .exec(&self.txn)
            .await
            .map_err(db_err)?;
        debug!(
            "decrement vacancies package={} qty={} rows={}",
            package_id, qty, result.rows_affected
        );
        Ok(result.rows_affected == 1)
    }

    async fn increment_vacancies(&mut self, package_id: &str, qty: i32) -> DomainResult<bool> {
        let result = tour_package::Entity::update_many()
            .col_expr(
                tour_package::Column::Vacancies,
                Expr::col(tour_package::Column::Vacancies).add(qty),
            )
            .filter(tour_package::Column::Id.eq(package_id))
            .filter(
                Expr::col(tour_package::Column::Vacancies)
                    .lte(Expr::col(tour_package::Column::SeatsAvailable).sub(qty)),
            )
            .exec(&self.txn)
            .await
            .map_err(db_err)?;
        debug!(
            "increment vacancies package={} qty={} rows={}",
            package_id, qty, result.rows_affected
        );
        Ok(result.rows_affected == 1)
    }

    async fn clamp_vacancies(&mut self, package_id: &str) -> DomainResult<()> {
        tour_package::Entity::update_many()
            .col_expr(
                tour_package::Column::Vacancies,
                Expr::col(tour_package::Column::SeatsAvailable).into(),
            )
            .filter(tour_package::Column::Id.eq(package_id))
            .exec(&self.txn)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn update_lifecycle(
        &mut self,
        package: &TourPackage,
        expected: TourLifecycle,
    ) -> DomainResult<bool> {
        let (was_running, was_finalised) = expected.flags();
        let result = tour_package::Entity::update_many()
            .col_expr(tour_package::Column::IsRunning, package.is_running.into())
            .col_expr(tour_package::Column::IsFinalised, package.is_finalised.into())
            .col_expr(tour_package::Column::StartDate, package.start_date.into())
            .col_expr(tour_package::Column::EndDate, package.end_date.into())
            .filter(tour_package::Column::Id.eq(package.id.as_str()))
            .filter(tour_package::Column::IsRunning.eq(was_running))
            .filter(tour_package::Column::IsFinalised.eq(was_finalised))
            .exec(&self.txn)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected == 1)
    }

    async fn insert_reservation(&mut self, r: &Reservation) -> DomainResult<()> {
        reservation_to_active(r)
            .insert(&self.txn)
            .await
            .map_err(insert_err("reservation"))?;
        Ok(())
    }

    async fn reservation(&mut self, id: &str) -> DomainResult<Option<Reservation>> {
        let model = reservation::Entity::find_by_id(id)
            .one(&self.txn)
            .await
            .map_err(db_err)?;
        Ok(model.map(reservation_from_model))
    }

    async fn transition_reservation(
        &mut self,
        r: &Reservation,
        expected: ReservationStatus,
    ) -> DomainResult<bool> {
        let (was_confirmed, was_canceled) = expected.flags();
        let result = reservation::Entity::update_many()
            .col_expr(reservation::Column::Confirmed, r.confirmed.into())
            .col_expr(reservation::Column::Canceled, r.canceled.into())
            .col_expr(
                reservation::Column::PaymentReference,
                r.payment_reference.clone().into(),
            )
            .col_expr(reservation::Column::ConfirmedAt, r.confirmed_at.into())
            .col_expr(reservation::Column::CanceledAt, r.canceled_at.into())
            .filter(reservation::Column::Id.eq(r.id.as_str()))
            .filter(reservation::Column::Confirmed.eq(was_confirmed))
            .filter(reservation::Column::Canceled.eq(was_canceled))
            .exec(&self.txn)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected == 1)
    }

    async fn confirmed_reservations_for_package(
        &mut self,
        package_id: &str,
    ) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::TourPackageId.eq(package_id))
            .filter(reservation::Column::Confirmed.eq(true))
            .filter(reservation::Column::Canceled.eq(false))
            .order_by_asc(reservation::Column::CreatedAt)
            .all(&self.txn)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(reservation_from_model).collect())
    }

    async fn entries_for_reservations(
        &mut self,
        reservation_ids: &[String],
    ) -> DomainResult<Vec<LedgerEntry>> {
        if reservation_ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = ledger_entry::Entity::find()
            .filter(ledger_entry::Column::ReservationId.is_in(reservation_ids.iter().cloned()))
            .order_by_asc(ledger_entry::Column::CreatedAt)
            .all(&self.txn)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entry_from_model).collect())
    }

    async fn append_entries(&mut self, entries: &[LedgerEntry]) -> DomainResult<()> {
        if entries.is_empty() {
            return Ok(());
        }
        ledger_entry::Entity::insert_many(entries.iter().map(entry_to_active))
            .exec(&self.txn)
            .await
            .map_err(insert_err("ledger entry"))?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> DomainResult<()> {
        let tx = *self;
        tx.txn.commit().await.map_err(db_err)
    }
}
