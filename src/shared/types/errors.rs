use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Insufficient capacity: requested {requested}, available {available}")]
    InsufficientCapacity { requested: i32, available: i32 },

    #[error("Tour package {0} is not open for reservations")]
    PackageUnavailable(String),

    #[error("Reservation {0} is already canceled")]
    AlreadyCanceled(String),

    #[error("Tour package {0} is already running")]
    AlreadyRunning(String),

    #[error("Tour package {0} is not running")]
    NotRunning(String),

    #[error("Tour package {0} is already finalised")]
    TourFinalised(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(i64),

    #[error("Payment failed: {0}")]
    PaymentFailed(String),

    #[error("Payment gateway timed out after {0}s")]
    PaymentTimeout(u64),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, value: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            field: "id",
            value: value.into(),
        }
    }

    /// Whether this error is likely transient (e.g. DB connection lost)
    /// and the operation may succeed if retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::PaymentTimeout(_))
    }

    /// State conflicts on a reservation or tour lifecycle.
    pub fn is_state_conflict(&self) -> bool {
        matches!(
            self,
            Self::AlreadyCanceled(_)
                | Self::AlreadyRunning(_)
                | Self::NotRunning(_)
                | Self::TourFinalised(_)
                | Self::InvalidTransition(_)
        )
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::Storage(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_conflicts_are_classified() {
        assert!(DomainError::AlreadyCanceled("r1".into()).is_state_conflict());
        assert!(DomainError::TourFinalised("p1".into()).is_state_conflict());
        assert!(!DomainError::InvalidCredentials.is_state_conflict());
    }

    #[test]
    fn capacity_message_names_both_counts() {
        let err = DomainError::InsufficientCapacity {
            requested: 3,
            available: 2,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient capacity: requested 3, available 2"
        );
    }
}
