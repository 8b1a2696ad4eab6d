//! Tour package aggregate
//!
//! Contains the TourPackage entity, its lifecycle, and repository interface.

pub mod model;
pub mod repository;

pub use model::{NewTourPackage, TourLifecycle, TourPackage, TourType};
pub use repository::TourPackageRepository;
