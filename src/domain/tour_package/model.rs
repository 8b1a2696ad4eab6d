//! Tour package domain entity
//!
//! A package is a dated tour with a fixed seat capacity. `vacancies` is the
//! only counter that moves with reservations; `is_running` / `is_finalised`
//! move with the driver's start and finish actions.

use chrono::{DateTime, Utc};

use crate::domain::{DomainError, DomainResult};

/// Kind of vehicle the tour runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourType {
    Buggy,
    Lancha,
    FourByFour,
}

impl TourType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buggy => "BUGGY",
            Self::Lancha => "LANCHA",
            Self::FourByFour => "FOUR_BY_FOUR",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUGGY" => Some(Self::Buggy),
            "LANCHA" => Some(Self::Lancha),
            "FOUR_BY_FOUR" | "4X4" => Some(Self::FourByFour),
            _ => None,
        }
    }
}

impl std::fmt::Display for TourType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle phase derived from the `is_running` / `is_finalised` flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourLifecycle {
    Scheduled,
    Running,
    Finalised,
}

impl TourLifecycle {
    /// `(is_running, is_finalised)` for this phase
    pub fn flags(&self) -> (bool, bool) {
        match self {
            Self::Scheduled => (false, false),
            Self::Running => (true, false),
            Self::Finalised => (false, true),
        }
    }
}

/// Input for publishing a new package
#[derive(Debug, Clone)]
pub struct NewTourPackage {
    pub driver_id: String,
    pub car_id: Option<String>,
    pub tourist_point_id: Option<String>,
    pub title: String,
    pub origin_local: String,
    pub destiny_local: String,
    pub date_tour: DateTime<Utc>,
    /// Price per seat in minor units
    pub price: i64,
    pub seats_available: i32,
    pub tour_type: TourType,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TourPackage {
    pub id: String,
    pub driver_id: String,
    pub car_id: Option<String>,
    pub tourist_point_id: Option<String>,
    pub title: String,
    pub origin_local: String,
    pub destiny_local: String,
    pub date_tour: DateTime<Utc>,
    /// Price per seat in minor units
    pub price: i64,
    /// Total capacity, fixed at creation
    pub seats_available: i32,
    /// Remaining unreserved seats
    pub vacancies: i32,
    pub tour_type: TourType,
    pub is_running: bool,
    pub is_finalised: bool,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TourPackage {
    pub fn new(input: NewTourPackage) -> DomainResult<Self> {
        if input.title.trim().is_empty() {
            return Err(DomainError::Validation("title is required".to_string()));
        }
        if input.seats_available < 1 {
            return Err(DomainError::Validation(
                "seatsAvailable must be at least 1".to_string(),
            ));
        }
        if input.price < 0 {
            return Err(DomainError::Validation(
                "price must not be negative".to_string(),
            ));
        }

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            driver_id: input.driver_id,
            car_id: input.car_id,
            tourist_point_id: input.tourist_point_id,
            title: input.title.trim().to_string(),
            origin_local: input.origin_local,
            destiny_local: input.destiny_local,
            date_tour: input.date_tour,
            price: input.price,
            seats_available: input.seats_available,
            vacancies: input.seats_available,
            tour_type: input.tour_type,
            is_running: false,
            is_finalised: false,
            start_date: None,
            end_date: None,
            image_url: input.image_url,
            created_at: Utc::now(),
        })
    }

    pub fn lifecycle(&self) -> TourLifecycle {
        if self.is_finalised {
            TourLifecycle::Finalised
        } else if self.is_running {
            TourLifecycle::Running
        } else {
            TourLifecycle::Scheduled
        }
    }

    pub fn seats_sold(&self) -> i32 {
        self.seats_available - self.vacancies
    }

    /// `0 <= vacancies <= seats_available` and never running once finalised
    pub fn invariants_hold(&self) -> bool {
        (0..=self.seats_available).contains(&self.vacancies)
            && !(self.is_running && self.is_finalised)
    }

    pub fn ensure_owned_by(&self, driver_id: &str) -> DomainResult<()> {
        if self.driver_id == driver_id {
            Ok(())
        } else {
            Err(DomainError::Forbidden(format!(
                "tour package {} belongs to another driver",
                self.id
            )))
        }
    }

    /// Reservations are only taken before the tour departs.
    pub fn ensure_bookable(&self) -> DomainResult<()> {
        match self.lifecycle() {
            TourLifecycle::Scheduled => Ok(()),
            _ => Err(DomainError::PackageUnavailable(self.id.clone())),
        }
    }

    /// Scheduled → Running. Starting with no seats sold is allowed.
    pub fn start(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        match self.lifecycle() {
            TourLifecycle::Scheduled => {
                self.is_running = true;
                self.start_date = Some(now);
                Ok(())
            }
            TourLifecycle::Running => Err(DomainError::AlreadyRunning(self.id.clone())),
            TourLifecycle::Finalised => Err(DomainError::TourFinalised(self.id.clone())),
        }
    }

    /// Running → Finalised
    pub fn finish(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        match self.lifecycle() {
            TourLifecycle::Running => {
                self.is_running = false;
                self.is_finalised = true;
                self.end_date = Some(now);
                Ok(())
            }
            _ => Err(DomainError::NotRunning(self.id.clone())),
        }
    }
}
