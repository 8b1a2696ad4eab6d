//! SeaORM implementation of FleetRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::mapping::{car_from_model, db_err, insert_err, tourist_point_from_model};
use crate::domain::fleet::{Car, FleetRepository, TouristPoint};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{car, tourist_point};

pub struct SeaOrmFleetRepository {
    db: DatabaseConnection,
}

impl SeaOrmFleetRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FleetRepository for SeaOrmFleetRepository {
    async fn save_car(&self, c: Car) -> DomainResult<()> {
        debug!("Saving car {} for driver {}", c.plate, c.driver_id);
        let model = car::ActiveModel {
            id: Set(c.id),
            driver_id: Set(c.driver_id),
            model: Set(c.model),
            plate: Set(c.plate),
            capacity: Set(c.capacity),
            created_at: Set(c.created_at),
        };
        model.insert(&self.db).await.map_err(insert_err("car"))?;
        Ok(())
    }

    async fn find_car(&self, id: &str) -> DomainResult<Option<Car>> {
        let model = car::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(car_from_model))
    }

    async fn cars_for_driver(&self, driver_id: &str) -> DomainResult<Vec<Car>> {
        let models = car::Entity::find()
            .filter(car::Column::DriverId.eq(driver_id))
            .order_by_desc(car::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(car_from_model).collect())
    }

    async fn save_tourist_point(&self, p: TouristPoint) -> DomainResult<()> {
        debug!("Saving tourist point {} for driver {}", p.name, p.driver_id);
        let model = tourist_point::ActiveModel {
            id: Set(p.id),
            driver_id: Set(p.driver_id),
            name: Set(p.name),
            city: Set(p.city),
            description: Set(p.description),
            created_at: Set(p.created_at),
        };
        model
            .insert(&self.db)
            .await
            .map_err(insert_err("tourist point"))?;
        Ok(())
    }

    async fn find_tourist_point(&self, id: &str) -> DomainResult<Option<TouristPoint>> {
        let model = tourist_point::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(tourist_point_from_model))
    }

    async fn tourist_points_for_driver(&self, driver_id: &str) -> DomainResult<Vec<TouristPoint>> {
        let models = tourist_point::Entity::find()
            .filter(tourist_point::Column::DriverId.eq(driver_id))
            .order_by_desc(tourist_point::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(tourist_point_from_model).collect())
    }
}
