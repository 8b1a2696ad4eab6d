//! Driver fleet handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};

use super::dto::{
    CarPayload, CarsPayload, RegisterCarRequest, RegisterTouristPointRequest, TouristPointPayload,
    TouristPointsPayload,
};
use crate::application::FleetService;
use crate::domain::Actor;
use crate::interfaces::http::common::{ApiResponse, ApiResult, ValidatedJson};

#[derive(Clone)]
pub struct FleetHandlerState {
    pub fleet: Arc<FleetService>,
}

/// `POST /car/registration`
pub async fn register_car(
    State(state): State<FleetHandlerState>,
    Extension(actor): Extension<Actor>,
    ValidatedJson(request): ValidatedJson<RegisterCarRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<CarPayload>>)> {
    let car = state
        .fleet
        .register_car(&actor, &request.model, &request.plate, request.capacity)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Car registered successfully",
            CarPayload { car: car.into() },
        )),
    ))
}

/// `GET /car/driver`
pub async fn list_cars(
    State(state): State<FleetHandlerState>,
    Extension(actor): Extension<Actor>,
) -> ApiResult<Json<ApiResponse<CarsPayload>>> {
    let cars = state.fleet.list_cars(&actor).await?;
    Ok(Json(ApiResponse::success(
        "Cars retrieved",
        CarsPayload {
            cars: cars.into_iter().map(Into::into).collect(),
        },
    )))
}

/// `POST /touristPoint/registration`
pub async fn register_tourist_point(
    State(state): State<FleetHandlerState>,
    Extension(actor): Extension<Actor>,
    ValidatedJson(request): ValidatedJson<RegisterTouristPointRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<TouristPointPayload>>)> {
    let point = state
        .fleet
        .register_tourist_point(&actor, &request.name, &request.city, request.description)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Tourist point registered successfully",
            TouristPointPayload {
                tourist_point: point.into(),
            },
        )),
    ))
}

/// `GET /touristPoint/driver`
pub async fn list_tourist_points(
    State(state): State<FleetHandlerState>,
    Extension(actor): Extension<Actor>,
) -> ApiResult<Json<ApiResponse<TouristPointsPayload>>> {
    let points = state.fleet.list_tourist_points(&actor).await?;
    Ok(Json(ApiResponse::success(
        "Tourist points retrieved",
        TouristPointsPayload {
            tourist_points: points.into_iter().map(Into::into).collect(),
        },
    )))
}
