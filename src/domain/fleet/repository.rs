//! Fleet repository interface

use async_trait::async_trait;

use super::model::{Car, TouristPoint};
use crate::domain::DomainResult;

#[async_trait]
pub trait FleetRepository: Send + Sync {
    async fn save_car(&self, car: Car) -> DomainResult<()>;
    async fn find_car(&self, id: &str) -> DomainResult<Option<Car>>;
    async fn cars_for_driver(&self, driver_id: &str) -> DomainResult<Vec<Car>>;

    async fn save_tourist_point(&self, point: TouristPoint) -> DomainResult<()>;
    async fn find_tourist_point(&self, id: &str) -> DomainResult<Option<TouristPoint>>;
    async fn tourist_points_for_driver(&self, driver_id: &str) -> DomainResult<Vec<TouristPoint>>;
}
