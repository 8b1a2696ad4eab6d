//! Payment gateway interface and intent model

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::reservation::Reservation;
use crate::domain::{DomainError, DomainResult};

/// Status of a payment intent as reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    RequiresPayment,
    Processing,
    Succeeded,
    Canceled,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RequiresPayment => "requires_payment_method",
            Self::Processing => "processing",
            Self::Succeeded => "succeeded",
            Self::Canceled => "canceled",
            Self::Failed => "failed",
        }
    }

    /// Map a Stripe `status` string. Unknown states count as not paid.
    pub fn from_provider(s: &str) -> Self {
        match s {
            "succeeded" => Self::Succeeded,
            "processing" => Self::Processing,
            "canceled" => Self::Canceled,
            "requires_payment_method" | "requires_confirmation" | "requires_action"
            | "requires_capture" => Self::RequiresPayment,
            _ => Self::Failed,
        }
    }
}

/// What the core asks the provider to collect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentRequest {
    pub reservation_id: String,
    /// Minor units
    pub amount: i64,
    /// ISO 4217, lowercase
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub status: PaymentStatus,
    pub client_secret: Option<String>,
    /// Reservation id echoed back from the intent metadata
    pub reservation_id: Option<String>,
}

impl PaymentIntent {
    /// Check that this intent really paid for `reservation`.
    pub fn verify_for(&self, reservation: &Reservation, currency: &str) -> DomainResult<()> {
        if self.reservation_id.as_deref() != Some(reservation.id.as_str()) {
            return Err(DomainError::PaymentFailed(format!(
                "intent {} was not created for reservation {}",
                self.id, reservation.id
            )));
        }
        if self.amount != reservation.amount || !self.currency.eq_ignore_ascii_case(currency) {
            return Err(DomainError::PaymentFailed(format!(
                "intent {} amount {} {} does not match reservation amount {} {}",
                self.id, self.amount, self.currency, reservation.amount, currency
            )));
        }
        if self.status != PaymentStatus::Succeeded {
            return Err(DomainError::PaymentFailed(format!(
                "intent {} is {}",
                self.id,
                self.status.as_str()
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("payment declined: {0}")]
    Declined(String),

    #[error("payment intent {0} not found")]
    NotFound(String),

    #[error("gateway transport error: {0}")]
    Transport(String),

    #[error("unexpected gateway response: {0}")]
    Protocol(String),
}

impl From<GatewayError> for DomainError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::Declined(_) | GatewayError::NotFound(_) => {
                DomainError::PaymentFailed(e.to_string())
            }
            GatewayError::Transport(_) | GatewayError::Protocol(_) => {
                DomainError::Internal(e.to_string())
            }
        }
    }
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &'static str;

    async fn create_intent(&self, request: &IntentRequest) -> Result<PaymentIntent, GatewayError>;

    async fn retrieve_intent(&self, intent_id: &str) -> Result<PaymentIntent, GatewayError>;
}
