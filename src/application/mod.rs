//! Application layer: use-case services over the domain ports.

pub mod booking;
pub mod fleet;
pub mod identity;
pub mod ledger;

#[cfg(test)]
pub(crate) mod test_support;

pub use booking::{
    BookingSettings, FinishedTour, InventoryService, PublishPackage, ReservationService,
    SeatRelease, SettlementMode, TourService,
};
pub use fleet::FleetService;
pub use identity::{AccountService, AuthTokens, Registration};
pub use ledger::LedgerService;
