//! Account service: registration, login and token refresh for users and
//! drivers.
//!
//! HTTP handlers are thin wrappers that delegate here.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::domain::{Account, DomainError, DomainResult, RepositoryProvider, Role};
use crate::infrastructure::crypto::jwt::{create_token, verify_token, JwtConfig, TokenKind};
use crate::infrastructure::crypto::password::{hash_password, verify_password};

/// Input for a new account
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
}

/// Token pair returned after login or refresh
#[derive(Debug, Clone)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
    pub account: Account,
}

pub struct AccountService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
    bcrypt_cost: u32,
}

impl AccountService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig, bcrypt_cost: u32) -> Self {
        Self {
            repos,
            jwt_config,
            bcrypt_cost,
        }
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    // ── Registration ────────────────────────────────────────────

    pub async fn register(&self, role: Role, input: Registration) -> DomainResult<Account> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("name is required".into()));
        }
        if !input.email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".into()));
        }
        if input.password.len() < 6 {
            return Err(DomainError::Validation(
                "Password must be at least 6 characters".into(),
            ));
        }

        if self
            .repos
            .accounts()
            .find_by_email(&input.email, role)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(format!(
                "{} with this email already exists",
                role
            )));
        }

        let hash = hash_password(&input.password, self.bcrypt_cost)
            .map_err(|e| DomainError::Internal(format!("Failed to hash password: {}", e)))?;
        let account = Account::new(role, name, input.email, input.phone, hash);
        self.repos.accounts().save(account.clone()).await?;

        info!(account_id = %account.id, role = %role, "Account registered");
        Ok(account)
    }

    // ── Authentication ──────────────────────────────────────────

    pub async fn login(&self, role: Role, email: &str, password: &str) -> DomainResult<AuthTokens> {
        let Some(mut account) = self.repos.accounts().find_by_email(email, role).await? else {
            warn!(role = %role, "Login for unknown account");
            return Err(DomainError::InvalidCredentials);
        };

        let valid = verify_password(password, &account.password_hash).unwrap_or(false);
        if !valid {
            warn!(account_id = %account.id, "Login with wrong password");
            return Err(DomainError::InvalidCredentials);
        }

        let now = Utc::now();
        self.repos.accounts().touch_login(&account.id, now).await?;
        account.last_login_at = Some(now);

        info!(account_id = %account.id, role = %role, "Login succeeded");
        self.issue(account)
    }

    /// Exchange a refresh token of `role` for a new pair.
    pub async fn refresh(&self, role: Role, refresh_token: &str) -> DomainResult<AuthTokens> {
        let claims = verify_token(refresh_token, &self.jwt_config)
            .map_err(|e| DomainError::Unauthorized(format!("Invalid refresh token: {}", e)))?;
        if claims.kind != TokenKind::Refresh {
            return Err(DomainError::Unauthorized("Not a refresh token".into()));
        }
        if claims.role != role {
            return Err(DomainError::Unauthorized(format!(
                "Refresh token was not issued to a {}",
                role
            )));
        }

        let account = self
            .repos
            .accounts()
            .find_by_id(&claims.sub)
            .await?
            .ok_or_else(|| DomainError::Unauthorized("Account no longer exists".into()))?;
        self.issue(account)
    }

    fn issue(&self, account: Account) -> DomainResult<AuthTokens> {
        let sign = |kind| {
            create_token(&account.id, &account.email, account.role, kind, &self.jwt_config)
                .map_err(|e| DomainError::Internal(format!("Failed to create token: {}", e)))
        };
        Ok(AuthTokens {
            access_token: sign(TokenKind::Access)?,
            refresh_token: sign(TokenKind::Refresh)?,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.access_token_minutes * 60,
            account,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::Harness;

    fn registration(email: &str) -> Registration {
        Registration {
            name: "Maria".into(),
            email: email.into(),
            phone: Some("+55 84 99999-0000".into()),
            password: "secret123".into(),
        }
    }

    #[tokio::test]
    async fn register_login_refresh() {
        let h = Harness::new().await;
        let account = h
            .accounts
            .register(Role::User, registration("maria@mail.com"))
            .await
            .unwrap();
        assert_ne!(account.password_hash, "secret123");

        let tokens = h
            .accounts
            .login(Role::User, "Maria@Mail.com", "secret123")
            .await
            .unwrap();
        assert_eq!(tokens.account.id, account.id);
        assert!(tokens.account.last_login_at.is_some());

        let again = h.accounts.refresh(Role::User, &tokens.refresh_token).await.unwrap();
        assert_eq!(again.account.id, account.id);
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts_per_role() {
        let h = Harness::new().await;
        h.accounts
            .register(Role::Driver, registration("joao@mail.com"))
            .await
            .unwrap();
        assert!(matches!(
            h.accounts
                .register(Role::Driver, registration("joao@mail.com"))
                .await,
            Err(DomainError::Conflict(_))
        ));
        assert!(h
            .accounts
            .register(Role::User, registration("joao@mail.com"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn bad_credentials_and_wrong_token_kind() {
        let h = Harness::new().await;
        h.accounts
            .register(Role::User, registration("ana@mail.com"))
            .await
            .unwrap();

        assert!(matches!(
            h.accounts.login(Role::User, "ana@mail.com", "nope").await,
            Err(DomainError::InvalidCredentials)
        ));
        assert!(matches!(
            h.accounts.login(Role::Driver, "ana@mail.com", "secret123").await,
            Err(DomainError::InvalidCredentials)
        ));

        let tokens = h
            .accounts
            .login(Role::User, "ana@mail.com", "secret123")
            .await
            .unwrap();
        assert!(matches!(
            h.accounts.refresh(Role::User, &tokens.access_token).await,
            Err(DomainError::Unauthorized(_))
        ));
        assert!(matches!(
            h.accounts.refresh(Role::Driver, &tokens.refresh_token).await,
            Err(DomainError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn weak_input_rejected() {
        let h = Harness::new().await;
        let mut input = registration("x@mail.com");
        input.password = "123".into();
        assert!(matches!(
            h.accounts.register(Role::User, input).await,
            Err(DomainError::Validation(_))
        ));
    }
}
