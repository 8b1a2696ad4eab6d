//! Stripe PaymentIntents adapter
//!
//! Talks to the REST API directly: form-encoded POST to create, GET to
//! retrieve. The reservation id travels in `metadata[reservation_id]` and
//! doubles as the idempotency key, so a retried create returns the same intent.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::payment::{GatewayError, IntentRequest, PaymentGateway, PaymentIntent, PaymentStatus};

pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";

#[derive(Clone)]
pub struct StripeGateway {
    client: Client,
    secret_key: String,
    api_base: String,
}

#[derive(Debug, Deserialize)]
struct StripeIntent {
    id: String,
    amount: i64,
    currency: String,
    status: String,
    client_secret: Option<String>,
    #[serde(default)]
    metadata: std::collections::HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

impl From<StripeIntent> for PaymentIntent {
    fn from(s: StripeIntent) -> Self {
        Self {
            status: PaymentStatus::from_provider(&s.status),
            reservation_id: s.metadata.get("reservation_id").cloned(),
            id: s.id,
            amount: s.amount,
            currency: s.currency,
            client_secret: s.client_secret,
        }
    }
}

impl StripeGateway {
    pub fn new(secret_key: impl Into<String>, api_base: Option<String>) -> Self {
        Self {
            client: Client::new(),
            secret_key: secret_key.into(),
            api_base: api_base
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
        }
    }

    async fn read_intent(&self, response: reqwest::Response, id_hint: &str) -> Result<PaymentIntent, GatewayError> {
        let status = response.status();
        if status.is_success() {
            let intent: StripeIntent = response
                .json()
                .await
                .map_err(|e| GatewayError::Protocol(e.to_string()))?;
            return Ok(intent.into());
        }

        let detail = response
            .json::<StripeErrorBody>()
            .await
            .ok()
            .map(|b| {
                format!(
                    "{} ({})",
                    b.error.message.unwrap_or_default(),
                    b.error.code.unwrap_or_default()
                )
            })
            .unwrap_or_else(|| status.to_string());

        warn!(status = %status, detail = %detail, "Stripe request failed");
        match status {
            StatusCode::NOT_FOUND => Err(GatewayError::NotFound(id_hint.to_string())),
            StatusCode::PAYMENT_REQUIRED | StatusCode::BAD_REQUEST => {
                Err(GatewayError::Declined(detail))
            }
            _ => Err(GatewayError::Transport(detail)),
        }
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    fn name(&self) -> &'static str {
        "stripe"
    }

    async fn create_intent(&self, request: &IntentRequest) -> Result<PaymentIntent, GatewayError> {
        debug!(reservation_id = %request.reservation_id, amount = request.amount, "Creating Stripe payment intent");

        let amount = request.amount.to_string();
        let params = [
            ("amount", amount.as_str()),
            ("currency", request.currency.as_str()),
            ("metadata[reservation_id]", request.reservation_id.as_str()),
            ("automatic_payment_methods[enabled]", "true"),
        ];

        let response = self
            .client
            .post(format!("{}/v1/payment_intents", self.api_base))
            .bearer_auth(&self.secret_key)
            .header("Idempotency-Key", format!("reservation-{}", request.reservation_id))
            .form(&params)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        self.read_intent(response, &request.reservation_id).await
    }

    async fn retrieve_intent(&self, intent_id: &str) -> Result<PaymentIntent, GatewayError> {
        let response = self
            .client
            .get(format!("{}/v1/payment_intents/{}", self.api_base, intent_id))
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        self.read_intent(response, intent_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stripe_payload_maps_to_intent() {
        let body = r#"{
            "id": "pi_3Nx",
            "object": "payment_intent",
            "amount": 30000,
            "currency": "brl",
            "status": "succeeded",
            "client_secret": "pi_3Nx_secret_abc",
            "metadata": {"reservation_id": "r-1"}
        }"#;
        let parsed: StripeIntent = serde_json::from_str(body).unwrap();
        let intent = PaymentIntent::from(parsed);
        assert_eq!(intent.status, PaymentStatus::Succeeded);
        assert_eq!(intent.reservation_id.as_deref(), Some("r-1"));
        assert_eq!(intent.amount, 30000);
    }

    #[test]
    fn api_base_trailing_slash_trimmed() {
        let gw = StripeGateway::new("sk_test", Some("http://localhost:12111/".into()));
        assert_eq!(gw.api_base, "http://localhost:12111");
    }
}
