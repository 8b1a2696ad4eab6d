//! JWT token handling
//!
//! Two kinds of token share one signing key: short-lived access tokens for
//! the API and longer-lived refresh tokens that can only mint new pairs.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::account::Role;

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Issuer claim
    pub issuer: String,
    pub access_token_minutes: i64,
    pub refresh_token_days: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            issuer: "tour-booking".to_string(),
            access_token_minutes: 60,
            refresh_token_days: 7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT TokenClaims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// Subject (account ID)
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub kind: TokenKind,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

impl TokenClaims {
    pub fn new(account_id: &str, email: &str, role: Role, kind: TokenKind, config: &JwtConfig) -> Self {
        let now = Utc::now();
        let ttl = match kind {
            TokenKind::Access => Duration::minutes(config.access_token_minutes),
            TokenKind::Refresh => Duration::days(config.refresh_token_days),
        };

        Self {
            sub: account_id.to_string(),
            email: email.to_string(),
            role,
            kind,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
        }
    }
}

/// Create a signed token for an account
pub fn create_token(
    account_id: &str,
    email: &str,
    role: Role,
    kind: TokenKind,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let token_claims = TokenClaims::new(account_id, email, role, kind, config);

    encode(
        &Header::default(),
        &token_claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify and decode a token. The caller checks `kind`.
pub fn verify_token(
    token: &str,
    config: &JwtConfig,
) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".into(),
            ..JwtConfig::default()
        }
    }

    #[test]
    fn token_roundtrip_keeps_role_and_kind() {
        let token = create_token("a1", "d@x.com", Role::Driver, TokenKind::Refresh, &config()).unwrap();
        let claims = verify_token(&token, &config()).unwrap();
        assert_eq!(claims.sub, "a1");
        assert_eq!(claims.role, Role::Driver);
        assert_eq!(claims.kind, TokenKind::Refresh);
    }

    #[test]
    fn wrong_secret_rejected() {
        let token = create_token("a1", "u@x.com", Role::User, TokenKind::Access, &config()).unwrap();
        let other = JwtConfig {
            secret: "other".into(),
            ..config()
        };
        assert!(verify_token(&token, &other).is_err());
    }

    #[test]
    fn expired_token_rejected() {
        let expired = JwtConfig {
            access_token_minutes: -10,
            ..config()
        };
        let token = create_token("a1", "u@x.com", Role::User, TokenKind::Access, &expired).unwrap();
        assert!(verify_token(&token, &config()).is_err());
    }
}
