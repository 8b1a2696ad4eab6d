//! Reservation domain entity

use chrono::{DateTime, Utc};

use crate::domain::{DomainError, DomainResult};
use crate::shared::line_total;

/// Reservation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    /// Seats held, payment not yet confirmed
    Pending,
    /// Payment confirmed
    Confirmed,
    /// Terminal; seats released
    Canceled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Canceled => "CANCELED",
        }
    }

    /// Derive the status from the stored `(confirmed, canceled)` flags.
    pub fn from_flags(confirmed: bool, canceled: bool) -> Self {
        if canceled {
            Self::Canceled
        } else if confirmed {
            Self::Confirmed
        } else {
            Self::Pending
        }
    }

    /// `(confirmed, canceled)` as persisted
    pub fn flags(&self) -> (bool, bool) {
        match self {
            Self::Pending => (false, false),
            Self::Confirmed => (true, false),
            Self::Canceled => (false, true),
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Seats booked by a user on a tour package
#[derive(Debug, Clone)]
pub struct Reservation {
    pub id: String,
    pub tour_package_id: String,
    pub user_id: String,
    pub vacancies_reserved: i32,
    /// `price × vacancies_reserved` in minor units, fixed at creation
    pub amount: i64,
    pub confirmed: bool,
    pub canceled: bool,
    /// Gateway intent id that paid for this reservation
    pub payment_reference: Option<String>,
    pub created_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub canceled_at: Option<DateTime<Utc>>,
}

impl Reservation {
    pub fn new(
        tour_package_id: impl Into<String>,
        user_id: impl Into<String>,
        vacancies_reserved: i32,
        unit_price: i64,
    ) -> DomainResult<Self> {
        if vacancies_reserved < 1 {
            return Err(DomainError::Validation(
                "vacancies_reserved must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            tour_package_id: tour_package_id.into(),
            user_id: user_id.into(),
            vacancies_reserved,
            amount: line_total(unit_price, vacancies_reserved)?,
            confirmed: false,
            canceled: false,
            payment_reference: None,
            created_at: Utc::now(),
            confirmed_at: None,
            canceled_at: None,
        })
    }

    pub fn status(&self) -> ReservationStatus {
        ReservationStatus::from_flags(self.confirmed, self.canceled)
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    /// Pending → Confirmed
    pub fn confirm(&mut self, payment_reference: impl Into<String>, now: DateTime<Utc>) -> DomainResult<()> {
        match self.status() {
            ReservationStatus::Pending => {
                self.confirmed = true;
                self.payment_reference = Some(payment_reference.into());
                self.confirmed_at = Some(now);
                Ok(())
            }
            ReservationStatus::Confirmed => Err(DomainError::InvalidTransition(format!(
                "reservation {} is already confirmed",
                self.id
            ))),
            ReservationStatus::Canceled => Err(DomainError::AlreadyCanceled(self.id.clone())),
        }
    }

    /// Pending | Confirmed → Canceled. Returns the status it left.
    pub fn cancel(&mut self, now: DateTime<Utc>) -> DomainResult<ReservationStatus> {
        let previous = self.status();
        if previous == ReservationStatus::Canceled {
            return Err(DomainError::AlreadyCanceled(self.id.clone()));
        }
        self.confirmed = false;
        self.canceled = true;
        self.canceled_at = Some(now);
        Ok(previous)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_reservation() -> Reservation {
        Reservation::new("PKG-1", "USER-1", 3, 15000).unwrap()
    }

    #[test]
    fn new_reservation_is_pending_with_computed_amount() {
        let r = sample_reservation();
        assert_eq!(r.status(), ReservationStatus::Pending);
        assert_eq!(r.amount, 45000);
        assert!(r.is_owned_by("USER-1"));
    }

    #[test]
    fn zero_seats_rejected() {
        assert!(matches!(
            Reservation::new("PKG-1", "USER-1", 0, 100),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn confirm_then_cancel_keeps_flags_exclusive() {
        let mut r = sample_reservation();
        r.confirm("pi_123", Utc::now()).unwrap();
        assert_eq!(r.status(), ReservationStatus::Confirmed);
        assert_eq!(r.payment_reference.as_deref(), Some("pi_123"));

        let previous = r.cancel(Utc::now()).unwrap();
        assert_eq!(previous, ReservationStatus::Confirmed);
        assert!(r.canceled && !r.confirmed);
        assert!(r.confirmed_at.is_some());
    }

    #[test]
    fn cancel_twice_is_rejected() {
        let mut r = sample_reservation();
        r.cancel(Utc::now()).unwrap();
        assert!(matches!(
            r.cancel(Utc::now()),
            Err(DomainError::AlreadyCanceled(_))
        ));
    }

    #[test]
    fn confirm_after_cancel_is_rejected() {
        let mut r = sample_reservation();
        r.cancel(Utc::now()).unwrap();
        assert!(matches!(
            r.confirm("pi_1", Utc::now()),
            Err(DomainError::AlreadyCanceled(_))
        ));
        assert!(!r.confirmed);
    }

    #[test]
    fn flags_roundtrip() {
        for status in [
            ReservationStatus::Pending,
            ReservationStatus::Confirmed,
            ReservationStatus::Canceled,
        ] {
            let (confirmed, canceled) = status.flags();
            assert!(!(confirmed && canceled));
            assert_eq!(ReservationStatus::from_flags(confirmed, canceled), status);
        }
    }
}
