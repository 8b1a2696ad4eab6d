//! Domain layer: booking aggregates, their invariants and the ports the
//! application layer drives.

pub mod account;
pub mod fleet;
pub mod ledger;
pub mod payment;
pub mod repositories;
pub mod reservation;
pub mod tour_package;

pub use account::{Account, Actor, Role};
pub use fleet::{Car, TouristPoint};
pub use ledger::{DateRange, EntryType, LedgerEntry, LedgerTotals, TypeTotal};
pub use payment::{GatewayError, IntentRequest, PaymentGateway, PaymentIntent, PaymentStatus};
pub use repositories::{BookingTx, DomainResult, RepositoryProvider, UnitOfWork};
pub use reservation::{Reservation, ReservationStatus};
pub use tour_package::{NewTourPackage, TourLifecycle, TourPackage, TourType};

pub use crate::shared::DomainError;
