//! Tour package entity

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum TourKind {
    #[sea_orm(string_value = "BUGGY")]
    Buggy,
    #[sea_orm(string_value = "LANCHA")]
    Lancha,
    #[sea_orm(string_value = "FOUR_BY_FOUR")]
    FourByFour,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tour_packages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub driver_id: String,
    #[sea_orm(nullable)]
    pub car_id: Option<String>,
    #[sea_orm(nullable)]
    pub tourist_point_id: Option<String>,
    pub title: String,
    pub origin_local: String,
    pub destiny_local: String,
    pub date_tour: DateTime<Utc>,
    /// Price per seat, minor units
    pub price: i64,
    pub seats_available: i32,
    pub vacancies: i32,
    pub tour_type: TourKind,
    pub is_running: bool,
    pub is_finalised: bool,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[sea_orm(nullable)]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::DriverId",
        to = "super::account::Column::Id"
    )]
    Driver,
    #[sea_orm(has_many = "super::reservation::Entity")]
    Reservations,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Driver.def()
    }
}

impl Related<super::reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
