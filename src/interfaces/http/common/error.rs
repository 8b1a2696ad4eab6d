//! Translation of core errors into HTTP responses
//!
//! Failure bodies are `{"message": "..."}`. Storage and internal errors are
//! logged and replaced with a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::domain::DomainError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Error returned by every handler
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::Validation(_) | DomainError::InvalidAmount(_) | DomainError::Conflict(_) => {
            StatusCode::BAD_REQUEST
        }
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Unauthorized(_) | DomainError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
        DomainError::InsufficientCapacity { .. } | DomainError::PackageUnavailable(_) => {
            StatusCode::CONFLICT
        }
        e if e.is_state_conflict() => StatusCode::BAD_REQUEST,
        DomainError::PaymentFailed(_) => StatusCode::PAYMENT_REQUIRED,
        DomainError::PaymentTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let status = status_for(&err);
        if status.is_server_error() && status != StatusCode::GATEWAY_TIMEOUT {
            error!(error = %err, "Request failed");
            return Self::new(status, "Internal server error");
        }
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                message: self.message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_table() {
        let cases = [
            (DomainError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (DomainError::InvalidAmount(0), StatusCode::BAD_REQUEST),
            (DomainError::Conflict("dup".into()), StatusCode::BAD_REQUEST),
            (DomainError::not_found("Reservation", "r1"), StatusCode::NOT_FOUND),
            (DomainError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (DomainError::Forbidden("no".into()), StatusCode::FORBIDDEN),
            (
                DomainError::InsufficientCapacity {
                    requested: 3,
                    available: 2,
                },
                StatusCode::CONFLICT,
            ),
            (DomainError::PackageUnavailable("p".into()), StatusCode::CONFLICT),
            (DomainError::AlreadyCanceled("r".into()), StatusCode::BAD_REQUEST),
            (DomainError::TourFinalised("p".into()), StatusCode::BAD_REQUEST),
            (DomainError::PaymentFailed("declined".into()), StatusCode::PAYMENT_REQUIRED),
            (DomainError::PaymentTimeout(10), StatusCode::GATEWAY_TIMEOUT),
            (DomainError::Storage("disk".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(status_for(&err), status, "{err}");
        }
    }

    #[test]
    fn internal_details_are_not_leaked() {
        let api: ApiError = DomainError::Storage("UNIQUE constraint failed: accounts.email".into()).into();
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message, "Internal server error");

        let api: ApiError = DomainError::AlreadyCanceled("r1".into()).into();
        assert_eq!(api.message, "Reservation r1 is already canceled");
    }
}
