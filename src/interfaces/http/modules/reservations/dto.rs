//! Reservation DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::Reservation;
use crate::shared::from_minor_units;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateReservationRequest {
    #[serde(rename = "tourPackageId", alias = "tour_package_id")]
    #[validate(length(min = 1, message = "tourPackageId is required"))]
    pub tour_package_id: String,
    #[serde(alias = "vacanciesReserved")]
    #[validate(range(min = 1, message = "vacancies_reserved must be at least 1"))]
    pub vacancies_reserved: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ConfirmReservationRequest {
    #[serde(alias = "paymentIntentId")]
    #[validate(length(min = 1, message = "payment_intent_id is required"))]
    pub payment_intent_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDto {
    pub id: String,
    pub tour_package_id: String,
    pub user_id: String,
    pub vacancies_reserved: i32,
    pub amount: Decimal,
    pub status: String,
    pub confirmed: bool,
    pub canceled: bool,
    pub payment_reference: Option<String>,
    pub created_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub canceled_at: Option<DateTime<Utc>>,
}

impl From<Reservation> for ReservationDto {
    fn from(r: Reservation) -> Self {
        Self {
            status: r.status().as_str().to_string(),
            id: r.id,
            tour_package_id: r.tour_package_id,
            user_id: r.user_id,
            vacancies_reserved: r.vacancies_reserved,
            amount: from_minor_units(r.amount),
            confirmed: r.confirmed,
            canceled: r.canceled,
            payment_reference: r.payment_reference,
            created_at: r.created_at,
            confirmed_at: r.confirmed_at,
            canceled_at: r.canceled_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReservationPayload {
    pub reservation: ReservationDto,
}

#[derive(Debug, Serialize)]
pub struct ReservationsPayload {
    pub reservations: Vec<ReservationDto>,
}
