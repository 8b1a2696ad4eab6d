//! Driver fleet: cars and tourist points

use std::sync::Arc;

use tracing::info;

use crate::domain::{Actor, Car, DomainResult, RepositoryProvider, Role, TouristPoint};

pub struct FleetService {
    repos: Arc<dyn RepositoryProvider>,
}

impl FleetService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn register_car(
        &self,
        actor: &Actor,
        model: &str,
        plate: &str,
        capacity: i32,
    ) -> DomainResult<Car> {
        actor.require(Role::Driver)?;
        let car = Car::new(&actor.id, model, plate, capacity)?;
        self.repos.fleet().save_car(car.clone()).await?;
        info!(car_id = %car.id, driver_id = %actor.id, plate = %car.plate, "Car registered");
        Ok(car)
    }

    pub async fn list_cars(&self, actor: &Actor) -> DomainResult<Vec<Car>> {
        actor.require(Role::Driver)?;
        self.repos.fleet().cars_for_driver(&actor.id).await
    }

    pub async fn register_tourist_point(
        &self,
        actor: &Actor,
        name: &str,
        city: &str,
        description: Option<String>,
    ) -> DomainResult<TouristPoint> {
        actor.require(Role::Driver)?;
        let point = TouristPoint::new(&actor.id, name, city, description);
        self.repos.fleet().save_tourist_point(point.clone()).await?;
        info!(point_id = %point.id, driver_id = %actor.id, "Tourist point registered");
        Ok(point)
    }

    pub async fn list_tourist_points(&self, actor: &Actor) -> DomainResult<Vec<TouristPoint>> {
        actor.require(Role::Driver)?;
        self.repos.fleet().tourist_points_for_driver(&actor.id).await
    }
}
