//! Runtime knobs of the booking services

use std::time::Duration;

use serde::Deserialize;

/// When a driver's share of a confirmed reservation becomes spendable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementMode {
    /// PENDANT at confirmation, CREDIT when the tour finishes
    #[default]
    Hold,
    /// CREDIT at confirmation
    Immediate,
}

#[derive(Debug, Clone)]
pub struct BookingSettings {
    /// ISO 4217, lowercase
    pub currency: String,
    pub gateway_timeout: Duration,
    pub settlement_mode: SettlementMode,
}

impl Default for BookingSettings {
    fn default() -> Self {
        Self {
            currency: "brl".to_string(),
            gateway_timeout: Duration::from_secs(10),
            settlement_mode: SettlementMode::Hold,
        }
    }
}
