//! Car and tourist point DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{Car, TouristPoint};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterCarRequest {
    #[validate(length(min = 1, max = 100, message = "model is required"))]
    pub model: String,
    #[validate(length(min = 1, max = 20, message = "plate is required"))]
    pub plate: String,
    #[validate(range(min = 1, max = 100, message = "capacity must be 1 to 100"))]
    pub capacity: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterTouristPointRequest {
    #[validate(length(min = 1, max = 120, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 120, message = "city is required"))]
    pub city: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarDto {
    pub id: String,
    pub driver_id: String,
    pub model: String,
    pub plate: String,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Car> for CarDto {
    fn from(c: Car) -> Self {
        Self {
            id: c.id,
            driver_id: c.driver_id,
            model: c.model,
            plate: c.plate,
            capacity: c.capacity,
            created_at: c.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TouristPointDto {
    pub id: String,
    pub driver_id: String,
    pub name: String,
    pub city: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<TouristPoint> for TouristPointDto {
    fn from(p: TouristPoint) -> Self {
        Self {
            id: p.id,
            driver_id: p.driver_id,
            name: p.name,
            city: p.city,
            description: p.description,
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CarPayload {
    pub car: CarDto,
}

#[derive(Debug, Serialize)]
pub struct CarsPayload {
    pub cars: Vec<CarDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TouristPointPayload {
    pub tourist_point: TouristPointDto,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TouristPointsPayload {
    pub tourist_points: Vec<TouristPointDto>,
}
