//! Database entities module

pub mod account;
pub mod car;
pub mod ledger_entry;
pub mod reservation;
pub mod tour_package;
pub mod tourist_point;

pub use account::Entity as Account;
pub use car::Entity as Car;
pub use ledger_entry::Entity as LedgerEntry;
pub use reservation::Entity as Reservation;
pub use tour_package::Entity as TourPackage;
pub use tourist_point::Entity as TouristPoint;
