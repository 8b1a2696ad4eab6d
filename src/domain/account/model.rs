//! Account domain entity (tourists and drivers)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Tourist booking seats
    User,
    /// Tour operator publishing packages
    Driver,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Driver => "driver",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "user" => Some(Self::User),
            "driver" => Some(Self::Driver),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Registered account
#[derive(Debug, Clone)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Account {
    pub fn new(
        role: Role,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: Option<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            email: email.into().trim().to_ascii_lowercase(),
            phone,
            password_hash: password_hash.into(),
            role,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }
}

/// The authenticated caller of a core operation.
///
/// Built per request by the HTTP auth middleware and handed to services
/// explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: String,
    pub role: Role,
}

impl Actor {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    pub fn user(id: impl Into<String>) -> Self {
        Self::new(id, Role::User)
    }

    pub fn driver(id: impl Into<String>) -> Self {
        Self::new(id, Role::Driver)
    }

    pub fn require(&self, role: Role) -> DomainResult<()> {
        if self.role == role {
            Ok(())
        } else {
            Err(DomainError::Forbidden(format!(
                "operation requires a {} account",
                role
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parse_is_case_insensitive() {
        assert_eq!(Role::parse("Driver"), Some(Role::Driver));
        assert_eq!(Role::parse("USER"), Some(Role::User));
        assert_eq!(Role::parse("admin"), None);
    }

    #[test]
    fn new_account_normalises_email() {
        let a = Account::new(Role::User, "Ana", "  Ana@Mail.COM ", None, "hash");
        assert_eq!(a.email, "ana@mail.com");
        assert!(a.last_login_at.is_none());
    }

    #[test]
    fn require_rejects_other_role() {
        let actor = Actor::user("u1");
        assert!(actor.require(Role::User).is_ok());
        assert!(matches!(
            actor.require(Role::Driver),
            Err(DomainError::Forbidden(_))
        ));
    }
}
