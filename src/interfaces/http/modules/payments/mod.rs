//! Payment intent creation for a pending reservation

use axum::{extract::State, Extension, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{Actor, PaymentIntent};
use crate::interfaces::http::common::{ApiResponse, ApiResult, ValidatedJson};
use crate::interfaces::http::modules::reservations::ReservationHandlerState;
use crate::shared::from_minor_units;

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePaymentIntentRequest {
    #[serde(rename = "reservationId", alias = "reservation_id")]
    #[validate(length(min = 1, message = "reservationId is required"))]
    pub reservation_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentPayload {
    pub payment_intent_id: String,
    pub client_secret: Option<String>,
    pub amount: Decimal,
    pub currency: String,
    pub status: String,
}

impl From<PaymentIntent> for PaymentIntentPayload {
    fn from(i: PaymentIntent) -> Self {
        Self {
            payment_intent_id: i.id,
            client_secret: i.client_secret,
            amount: from_minor_units(i.amount),
            currency: i.currency,
            status: i.status.as_str().to_string(),
        }
    }
}

/// `POST /stripe/create-payment-intent`
pub async fn create_payment_intent(
    State(state): State<ReservationHandlerState>,
    Extension(actor): Extension<Actor>,
    ValidatedJson(request): ValidatedJson<CreatePaymentIntentRequest>,
) -> ApiResult<Json<ApiResponse<PaymentIntentPayload>>> {
    let intent = state
        .reservations
        .create_payment_intent(&actor, &request.reservation_id)
        .await?;
    Ok(Json(ApiResponse::success(
        "Payment intent created",
        intent.into(),
    )))
}
