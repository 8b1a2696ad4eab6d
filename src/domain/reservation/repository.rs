//! Reservation repository interface
//!
//! Inserts and state transitions go through
//! [`BookingTx`](crate::domain::BookingTx) so they commit together with the
//! seat counter and ledger rows.

use async_trait::async_trait;

use super::model::Reservation;
use crate::domain::DomainResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Find reservation by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Reservation>>;

    /// All reservations made by a user, newest first
    async fn find_by_user(&self, user_id: &str) -> DomainResult<Vec<Reservation>>;

    /// All reservations (any status) on a tour package, newest first
    async fn find_by_package(&self, tour_package_id: &str) -> DomainResult<Vec<Reservation>>;
}
