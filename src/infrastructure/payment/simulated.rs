//! In-process payment gateway for development and tests
//!
//! Intents live in a `DashMap`. A created intent is immediately `succeeded`
//! unless the gateway was built to decline or to stall.

use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use rand::RngCore;
use tracing::debug;

use crate::domain::payment::{GatewayError, IntentRequest, PaymentGateway, PaymentIntent, PaymentStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatedOutcome {
    Succeed,
    Decline,
    /// Leave the intent awaiting a payment method
    Pending,
}

pub struct SimulatedGateway {
    intents: DashMap<String, PaymentIntent>,
    outcome: SimulatedOutcome,
    delay: Option<Duration>,
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(SimulatedOutcome::Succeed)
    }
}

impl SimulatedGateway {
    pub fn new(outcome: SimulatedOutcome) -> Self {
        Self {
            intents: DashMap::new(),
            outcome,
            delay: None,
        }
    }

    /// Sleep before answering `retrieve_intent`
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Register an intent directly, e.g. one the client paid elsewhere.
    pub fn insert(&self, intent: PaymentIntent) {
        self.intents.insert(intent.id.clone(), intent);
    }

    fn random_token(bytes: usize) -> String {
        let mut buf = vec![0u8; bytes];
        rand::thread_rng().fill_bytes(&mut buf);
        hex::encode(buf)
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn create_intent(&self, request: &IntentRequest) -> Result<PaymentIntent, GatewayError> {
        if let Some(existing) = self
            .intents
            .iter()
            .find(|i| i.reservation_id.as_deref() == Some(request.reservation_id.as_str()))
        {
            return Ok(existing.value().clone());
        }

        let id = format!("pi_sim_{}", Self::random_token(12));
        let status = match self.outcome {
            SimulatedOutcome::Succeed => PaymentStatus::Succeeded,
            SimulatedOutcome::Decline => PaymentStatus::Failed,
            SimulatedOutcome::Pending => PaymentStatus::RequiresPayment,
        };
        let intent = PaymentIntent {
            client_secret: Some(format!("{}_secret_{}", id, Self::random_token(8))),
            id,
            amount: request.amount,
            currency: request.currency.to_ascii_lowercase(),
            status,
            reservation_id: Some(request.reservation_id.clone()),
        };
        debug!(intent_id = %intent.id, status = intent.status.as_str(), "Simulated intent created");
        self.insert(intent.clone());
        Ok(intent)
    }

    async fn retrieve_intent(&self, intent_id: &str) -> Result<PaymentIntent, GatewayError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let intent = self
            .intents
            .get(intent_id)
            .map(|i| i.value().clone())
            .ok_or_else(|| GatewayError::NotFound(intent_id.to_string()))?;
        if intent.status == PaymentStatus::Failed {
            return Err(GatewayError::Declined(format!("card declined for {}", intent_id)));
        }
        Ok(intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> IntentRequest {
        IntentRequest {
            reservation_id: "r-1".into(),
            amount: 4500,
            currency: "brl".into(),
        }
    }

    #[tokio::test]
    async fn create_is_idempotent_per_reservation() {
        let gw = SimulatedGateway::default();
        let a = gw.create_intent(&request()).await.unwrap();
        let b = gw.create_intent(&request()).await.unwrap();
        assert_eq!(a.id, b.id);
        assert!(a.client_secret.unwrap().starts_with(&a.id));
    }

    #[tokio::test]
    async fn declined_intent_errors_on_retrieve() {
        let gw = SimulatedGateway::new(SimulatedOutcome::Decline);
        let intent = gw.create_intent(&request()).await.unwrap();
        assert!(matches!(
            gw.retrieve_intent(&intent.id).await,
            Err(GatewayError::Declined(_))
        ));
    }

    #[tokio::test]
    async fn unknown_intent_not_found() {
        let gw = SimulatedGateway::default();
        assert!(matches!(
            gw.retrieve_intent("pi_nope").await,
            Err(GatewayError::NotFound(_))
        ));
    }
}
