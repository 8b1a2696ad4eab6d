//! Reservation entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub tour_package_id: String,
    pub user_id: String,
    pub vacancies_reserved: i32,

    /// Minor units
    pub amount: i64,

    pub confirmed: bool,
    pub canceled: bool,

    #[sea_orm(nullable)]
    pub payment_reference: Option<String>,

    pub created_at: DateTimeUtc,
    pub confirmed_at: Option<DateTimeUtc>,
    pub canceled_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tour_package::Entity",
        from = "Column::TourPackageId",
        to = "super::tour_package::Column::Id"
    )]
    TourPackage,
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::UserId",
        to = "super::account::Column::Id"
    )]
    User,
}

impl Related<super::tour_package::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TourPackage.def()
    }
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
