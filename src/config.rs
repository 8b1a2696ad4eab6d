//! Application configuration
//!
//! Loaded from a TOML file (default `~/.config/tour-booking/config.toml`).
//! Every section and key is optional; a missing file means defaults.
//! `DATABASE_URL`, `JWT_SECRET`, `STRIPE_SECRET_KEY` and `PORT` override the
//! file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::application::{BookingSettings, SettlementMode};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::DatabaseConfig;

const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub security: SecurityConfig,
    pub payment: PaymentConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        let db = DatabaseConfig::default();
        Self {
            url: db.url,
            max_connections: db.max_connections,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub issuer: String,
    pub access_token_minutes: i64,
    pub refresh_token_days: i64,
    pub bcrypt_cost: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        let jwt = JwtConfig::default();
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            issuer: jwt.issuer,
            access_token_minutes: jwt.access_token_minutes,
            refresh_token_days: jwt.refresh_token_days,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentProvider {
    /// In-process gateway, every intent succeeds
    #[default]
    Simulated,
    Stripe,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaymentConfig {
    pub provider: PaymentProvider,
    pub currency: String,
    pub timeout_secs: u64,
    pub settlement_mode: SettlementMode,
    pub stripe_secret_key: Option<String>,
    pub stripe_api_base: Option<String>,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        let booking = BookingSettings::default();
        Self {
            provider: PaymentProvider::default(),
            currency: booking.currency,
            timeout_secs: booking.gateway_timeout.as_secs(),
            settlement_mode: booking.settlement_mode,
            stripe_secret_key: None,
            stripe_api_base: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory receiving tour package images
    pub uploads_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            uploads_dir: PathBuf::from("./uploads"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, `RUST_LOG` wins when set
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// `~/.config/tour-booking/config.toml`, or `./config.toml` without a home
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("tour-booking").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

impl AppConfig {
    /// Read `path` (defaults if absent), apply environment overrides, validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Apply `DATABASE_URL`, `JWT_SECRET`, `STRIPE_SECRET_KEY` and `PORT`
    /// as returned by `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(secret) = get("JWT_SECRET") {
            self.security.jwt_secret = secret;
        }
        if let Some(key) = get("STRIPE_SECRET_KEY") {
            self.payment.stripe_secret_key = Some(key);
        }
        if let Some(port) = get("PORT").and_then(|p| p.trim().parse().ok()) {
            self.server.port = port;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("security.jwt_secret is empty".into()));
        }
        if self.security.access_token_minutes <= 0 || self.security.refresh_token_days <= 0 {
            return Err(ConfigError::Invalid(
                "token lifetimes must be positive".into(),
            ));
        }
        if !(4..=31).contains(&self.security.bcrypt_cost) {
            return Err(ConfigError::Invalid(
                "security.bcrypt_cost must be between 4 and 31".into(),
            ));
        }
        if self.payment.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "payment.timeout_secs must be positive".into(),
            ));
        }
        let currency = self.payment.currency.trim();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::Invalid(format!(
                "payment.currency must be an ISO 4217 code, got {:?}",
                self.payment.currency
            )));
        }
        if self.payment.provider == PaymentProvider::Stripe
            && self
                .payment
                .stripe_secret_key
                .as_deref()
                .map_or(true, |k| k.trim().is_empty())
        {
            return Err(ConfigError::Invalid(
                "payment.provider = \"stripe\" requires stripe_secret_key".into(),
            ));
        }
        Ok(())
    }

    pub fn uses_default_secret(&self) -> bool {
        self.security.jwt_secret == DEFAULT_JWT_SECRET
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
        }
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.security.jwt_secret.clone(),
            issuer: self.security.issuer.clone(),
            access_token_minutes: self.security.access_token_minutes,
            refresh_token_days: self.security.refresh_token_days,
        }
    }

    pub fn booking_settings(&self) -> BookingSettings {
        BookingSettings {
            currency: self.payment.currency.trim().to_ascii_lowercase(),
            gateway_timeout: Duration::from_secs(self.payment.timeout_secs),
            settlement_mode: self.payment.settlement_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.payment.provider, PaymentProvider::Simulated);
        assert_eq!(cfg.payment.settlement_mode, SettlementMode::Hold);
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.uses_default_secret());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [server]
            port = 9090

            [payment]
            settlement_mode = "immediate"
            currency = "USD"
            timeout_secs = 3

            [storage]
            uploads_dir = "/var/lib/tour-booking/uploads"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.address(), "0.0.0.0:9090");
        assert_eq!(cfg.server.shutdown_timeout, 30);

        let booking = cfg.booking_settings();
        assert_eq!(booking.settlement_mode, SettlementMode::Immediate);
        assert_eq!(booking.currency, "usd");
        assert_eq!(booking.gateway_timeout, Duration::from_secs(3));
        assert_eq!(
            cfg.storage.uploads_dir,
            PathBuf::from("/var/lib/tour-booking/uploads")
        );
    }

    #[test]
    fn unknown_settlement_mode_is_a_parse_error() {
        assert!(AppConfig::from_toml("[payment]\nsettlement_mode = \"later\"").is_err());
    }

    #[test]
    fn environment_overrides_file_values() {
        let env: HashMap<&str, &str> = [
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_SECRET", "from-env"),
            ("STRIPE_SECRET_KEY", "sk_test_123"),
            ("PORT", "3000"),
        ]
        .into_iter()
        .collect();

        let mut cfg = AppConfig::default();
        cfg.apply_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.database_config().url, "sqlite::memory:");
        assert_eq!(cfg.jwt_config().secret, "from-env");
        assert_eq!(cfg.payment.stripe_secret_key.as_deref(), Some("sk_test_123"));
        assert_eq!(cfg.server.port, 3000);
        assert!(!cfg.uses_default_secret());
    }

    #[test]
    fn garbage_port_is_ignored() {
        let mut cfg = AppConfig::default();
        cfg.apply_overrides(|k| (k == "PORT").then(|| "eighty".to_string()));
        assert_eq!(cfg.server.port, 8080);
    }

    #[test]
    fn stripe_requires_a_key() {
        let mut cfg = AppConfig::from_toml("[payment]\nprovider = \"stripe\"").unwrap();
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
        cfg.payment.stripe_secret_key = Some("sk_test_1".into());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_bad_currency_and_cost() {
        let mut cfg = AppConfig::default();
        cfg.payment.currency = "reais".into();
        assert!(cfg.validate().is_err());

        let mut cfg = AppConfig::default();
        cfg.security.bcrypt_cost = 2;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let path = std::env::temp_dir().join(format!("missing-{}.toml", uuid::Uuid::new_v4()));
        let cfg = AppConfig::load(&path).unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
    }
}
