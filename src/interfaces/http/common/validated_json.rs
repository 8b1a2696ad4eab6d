//! JSON body extractor with `validator` checks
//!
//! Rejections use the API's `{ "message": ... }` error body: a body that
//! does not parse is a 400, a body that parses but breaks a field rule is a
//! 422 whose message lists every failure as `field: reason`, sorted and
//! joined with `"; "`.

use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::ApiError;

/// `Json<T>` that only yields bodies passing `T::validate()`.
///
/// ```ignore
/// async fn create(ValidatedJson(req): ValidatedJson<CreateReservationRequest>) { .. }
/// ```
pub struct ValidatedJson<T>(pub T);

/// One `field: reason` line per failed rule, in a stable order.
fn describe(errors: &ValidationErrors) -> String {
    let mut lines: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, failures)| {
            failures.iter().map(move |failure| {
                let reason = match &failure.message {
                    Some(m) => m.to_string(),
                    None => failure.code.to_string(),
                };
                format!("{field}: {reason}")
            })
        })
        .collect();
    lines.sort();

    if lines.is_empty() {
        "Validation failed".to_string()
    } else {
        lines.join("; ")
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: axum::extract::Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                ApiError::bad_request(format!("Invalid JSON: {}", rejection.body_text()))
            })?;

        if let Err(errors) = value.validate() {
            return Err(ApiError::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                describe(&errors),
            ));
        }
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::post;
    use axum::Router;
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    struct SeatRequest {
        #[validate(email)]
        email: String,
        #[validate(range(min = 1, max = 50))]
        seats: u32,
    }

    async fn book(ValidatedJson(req): ValidatedJson<SeatRequest>) -> String {
        format!("{} x{}", req.email, req.seats)
    }

    async fn post_raw(body: impl Into<Body>) -> (StatusCode, Value) {
        let req = Request::builder()
            .method("POST")
            .uri("/book")
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap();
        let resp = Router::new()
            .route("/book", post(book))
            .oneshot(req)
            .await
            .unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn accepts_valid_body() {
        let (status, _) = post_raw(json!({"email": "ana@mail.com", "seats": 3}).to_string()).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let (status, body) = post_raw("not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().starts_with("Invalid JSON"));
    }

    #[tokio::test]
    async fn rule_failures_are_listed_in_order() {
        let (status, body) =
            post_raw(json!({"email": "not-an-email", "seats": 0}).to_string()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let message = body["message"].as_str().unwrap();
        let fields: Vec<&str> = message
            .split("; ")
            .map(|line| line.split(':').next().unwrap())
            .collect();
        assert_eq!(fields, ["email", "seats"]);
    }
}
