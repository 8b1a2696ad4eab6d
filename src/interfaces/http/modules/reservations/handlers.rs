//! Reservation handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{
    ConfirmReservationRequest, CreateReservationRequest, ReservationPayload, ReservationsPayload,
};
use crate::application::ReservationService;
use crate::domain::Actor;
use crate::interfaces::http::common::{ApiResponse, ApiResult, ValidatedJson};

#[derive(Clone)]
pub struct ReservationHandlerState {
    pub reservations: Arc<ReservationService>,
}

/// `POST /reservation`
pub async fn create_reservation(
    State(state): State<ReservationHandlerState>,
    Extension(actor): Extension<Actor>,
    ValidatedJson(request): ValidatedJson<CreateReservationRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ReservationPayload>>)> {
    let reservation = state
        .reservations
        .create(&actor, &request.tour_package_id, request.vacancies_reserved)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Reservation created successfully",
            ReservationPayload {
                reservation: reservation.into(),
            },
        )),
    ))
}

/// `GET /reservation/user`
pub async fn list_user_reservations(
    State(state): State<ReservationHandlerState>,
    Extension(actor): Extension<Actor>,
) -> ApiResult<Json<ApiResponse<ReservationsPayload>>> {
    let reservations = state.reservations.list_for_user(&actor).await?;
    Ok(Json(ApiResponse::success(
        "Reservations retrieved",
        ReservationsPayload {
            reservations: reservations.into_iter().map(Into::into).collect(),
        },
    )))
}

/// `GET /reservation/tourPackage/{id}`
pub async fn list_package_reservations(
    State(state): State<ReservationHandlerState>,
    Extension(actor): Extension<Actor>,
    Path(package_id): Path<String>,
) -> ApiResult<Json<ApiResponse<ReservationsPayload>>> {
    let reservations = state
        .reservations
        .list_for_package(&actor, &package_id)
        .await?;
    Ok(Json(ApiResponse::success(
        "Reservations retrieved",
        ReservationsPayload {
            reservations: reservations.into_iter().map(Into::into).collect(),
        },
    )))
}

/// `PUT /reservation/{id}/confirm`
pub async fn confirm_reservation(
    State(state): State<ReservationHandlerState>,
    Extension(actor): Extension<Actor>,
    Path(reservation_id): Path<String>,
    ValidatedJson(request): ValidatedJson<ConfirmReservationRequest>,
) -> ApiResult<Json<ApiResponse<ReservationPayload>>> {
    let reservation = state
        .reservations
        .confirm(&actor, &reservation_id, &request.payment_intent_id)
        .await?;
    Ok(Json(ApiResponse::success(
        "Reservation confirmed",
        ReservationPayload {
            reservation: reservation.into(),
        },
    )))
}

/// `PUT /reservation/{id}/cancel`
pub async fn cancel_reservation(
    State(state): State<ReservationHandlerState>,
    Extension(actor): Extension<Actor>,
    Path(reservation_id): Path<String>,
) -> ApiResult<Json<ApiResponse<ReservationPayload>>> {
    let reservation = state.reservations.cancel(&actor, &reservation_id).await?;
    Ok(Json(ApiResponse::success(
        "Reservation canceled",
        ReservationPayload {
            reservation: reservation.into(),
        },
    )))
}
