//! Car and tourist point entities

use chrono::{DateTime, Utc};

use crate::domain::{DomainError, DomainResult};

/// Vehicle or boat a driver runs tours with
#[derive(Debug, Clone)]
pub struct Car {
    pub id: String,
    pub driver_id: String,
    pub model: String,
    pub plate: String,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
}

impl Car {
    pub fn new(
        driver_id: impl Into<String>,
        model: impl Into<String>,
        plate: impl Into<String>,
        capacity: i32,
    ) -> DomainResult<Self> {
        if capacity < 1 {
            return Err(DomainError::Validation(
                "car capacity must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            driver_id: driver_id.into(),
            model: model.into(),
            plate: plate.into().trim().to_ascii_uppercase(),
            capacity,
            created_at: Utc::now(),
        })
    }
}

/// Destination a driver offers tours to
#[derive(Debug, Clone)]
pub struct TouristPoint {
    pub id: String,
    pub driver_id: String,
    pub name: String,
    pub city: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TouristPoint {
    pub fn new(
        driver_id: impl Into<String>,
        name: impl Into<String>,
        city: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            driver_id: driver_id.into(),
            name: name.into(),
            city: city.into(),
            description,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn car_plate_is_normalised() {
        let car = Car::new("d1", "Buggy 4x4", " abc-1d23 ", 4).unwrap();
        assert_eq!(car.plate, "ABC-1D23");
    }

    #[test]
    fn car_needs_a_seat() {
        assert!(Car::new("d1", "Jet ski", "X", 0).is_err());
    }
}
