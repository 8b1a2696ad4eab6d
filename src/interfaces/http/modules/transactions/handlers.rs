//! Ledger handlers for drivers and users

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Extension, Json,
};

use super::dto::{RangeParams, TotalsPayload, TransactionsPayload};
use crate::application::LedgerService;
use crate::domain::{Actor, Role};
use crate::interfaces::http::common::{ApiResponse, ApiResult};

#[derive(Clone)]
pub struct TransactionHandlerState {
    pub ledger: Arc<LedgerService>,
}

async fn entries(
    state: &TransactionHandlerState,
    actor: &Actor,
    role: Role,
    params: &RangeParams,
) -> ApiResult<Json<ApiResponse<TransactionsPayload>>> {
    let rows = state.ledger.list(actor, role, params.to_range()?).await?;
    Ok(Json(ApiResponse::success(
        "Transactions retrieved",
        TransactionsPayload {
            transactions: rows.into_iter().map(Into::into).collect(),
        },
    )))
}

async fn totals(
    state: &TransactionHandlerState,
    actor: &Actor,
    role: Role,
    params: &RangeParams,
) -> ApiResult<Json<ApiResponse<TotalsPayload>>> {
    let totals = state.ledger.totals(actor, role, params.to_range()?).await?;
    Ok(Json(ApiResponse::success(
        "Totals retrieved",
        TotalsPayload {
            totals: totals.into(),
        },
    )))
}

/// `GET /transaction/driver/all`
pub async fn driver_transactions(
    State(state): State<TransactionHandlerState>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<RangeParams>,
) -> ApiResult<Json<ApiResponse<TransactionsPayload>>> {
    entries(&state, &actor, Role::Driver, &params).await
}

/// `GET /transaction/driver/totals`
pub async fn driver_totals(
    State(state): State<TransactionHandlerState>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<RangeParams>,
) -> ApiResult<Json<ApiResponse<TotalsPayload>>> {
    totals(&state, &actor, Role::Driver, &params).await
}

/// `GET /transaction/user/transactions`
pub async fn user_transactions(
    State(state): State<TransactionHandlerState>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<RangeParams>,
) -> ApiResult<Json<ApiResponse<TransactionsPayload>>> {
    entries(&state, &actor, Role::User, &params).await
}

/// `GET /transaction/user/totals`
pub async fn user_totals(
    State(state): State<TransactionHandlerState>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<RangeParams>,
) -> ApiResult<Json<ApiResponse<TotalsPayload>>> {
    totals(&state, &actor, Role::User, &params).await
}
