//! Registration, login and token refresh for users and drivers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use super::dto::{AccountPayload, AuthPayload, LoginRequest, RefreshRequest, RegisterRequest};
use crate::application::AccountService;
use crate::domain::Role;
use crate::interfaces::http::common::{ApiError, ApiResponse, ApiResult, ValidatedJson};

#[derive(Clone)]
pub struct AccountHandlerState {
    pub accounts: Arc<AccountService>,
}

fn parse_role(role: &str) -> ApiResult<Role> {
    Role::parse(role).ok_or_else(|| ApiError::not_found(format!("Unknown account type: {}", role)))
}

/// `POST /api/{role}/registration`
pub async fn register(
    State(state): State<AccountHandlerState>,
    Path(role): Path<String>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<AccountPayload>>)> {
    let role = parse_role(&role)?;
    let account = state.accounts.register(role, request.into()).await?;
    info!(account_id = %account.id, role = %role, "Registration via API");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            format!("{} registered successfully", capitalised(role)),
            AccountPayload {
                account: account.into(),
            },
        )),
    ))
}

/// `POST /api/{role}/login`
pub async fn login(
    State(state): State<AccountHandlerState>,
    Path(role): Path<String>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<ApiResponse<AuthPayload>>> {
    let role = parse_role(&role)?;
    let tokens = state
        .accounts
        .login(role, &request.email, &request.password)
        .await?;
    Ok(Json(ApiResponse::success("Login successful", tokens.into())))
}

/// `POST /api/{role}/refresh`
pub async fn refresh(
    State(state): State<AccountHandlerState>,
    Path(role): Path<String>,
    ValidatedJson(request): ValidatedJson<RefreshRequest>,
) -> ApiResult<Json<ApiResponse<AuthPayload>>> {
    let role = parse_role(&role)?;
    let tokens = state.accounts.refresh(role, &request.refresh_token).await?;
    Ok(Json(ApiResponse::success("Token refreshed", tokens.into())))
}

fn capitalised(role: Role) -> &'static str {
    match role {
        Role::User => "User",
        Role::Driver => "Driver",
    }
}
