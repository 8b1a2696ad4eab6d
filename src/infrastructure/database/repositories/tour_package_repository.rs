//! SeaORM implementation of TourPackageRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::mapping::{db_err, insert_err, package_from_model, tour_type_to_db};
use crate::domain::tour_package::{TourPackage, TourPackageRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::tour_package;
use crate::shared::PaginatedResult;

pub struct SeaOrmTourPackageRepository {
    db: DatabaseConnection,
}

impl SeaOrmTourPackageRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TourPackageRepository for SeaOrmTourPackageRepository {
    async fn save(&self, p: TourPackage) -> DomainResult<()> {
        debug!("Saving tour package {} for driver {}", p.id, p.driver_id);

        let model = tour_package::ActiveModel {
            id: Set(p.id),
            driver_id: Set(p.driver_id),
            car_id: Set(p.car_id),
            tourist_point_id: Set(p.tourist_point_id),
            title: Set(p.title),
            origin_local: Set(p.origin_local),
            destiny_local: Set(p.destiny_local),
            date_tour: Set(p.date_tour),
            price: Set(p.price),
            seats_available: Set(p.seats_available),
            vacancies: Set(p.vacancies),
            tour_type: Set(tour_type_to_db(p.tour_type)),
            is_running: Set(p.is_running),
            is_finalised: Set(p.is_finalised),
            start_date: Set(p.start_date),
            end_date: Set(p.end_date),
            image_url: Set(p.image_url),
            created_at: Set(p.created_at),
        };
        model
            .insert(&self.db)
            .await
            .map_err(insert_err("tour package"))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<TourPackage>> {
        let model = tour_package::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(package_from_model))
    }

    async fn find_open(&self, page: u64, limit: u64) -> DomainResult<PaginatedResult<TourPackage>> {
        let paginator = tour_package::Entity::find()
            .filter(tour_package::Column::IsRunning.eq(false))
            .filter(tour_package::Column::IsFinalised.eq(false))
            .filter(tour_package::Column::Vacancies.gt(0))
            .order_by_asc(tour_package::Column::DateTour)
            .order_by_asc(tour_package::Column::Id)
            .paginate(&self.db, limit);

        let total = paginator.num_items().await.map_err(db_err)?;
        let models = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(db_err)?;

        Ok(PaginatedResult::new(
            models.into_iter().map(package_from_model).collect(),
            total,
            page,
            limit,
        ))
    }

    async fn find_by_driver(&self, driver_id: &str) -> DomainResult<Vec<TourPackage>> {
        let models = tour_package::Entity::find()
            .filter(tour_package::Column::DriverId.eq(driver_id))
            .order_by_desc(tour_package::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(package_from_model).collect())
    }
}
