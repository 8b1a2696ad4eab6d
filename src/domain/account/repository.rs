//! Account repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{Account, Role};
use crate::domain::DomainResult;

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Save a new account. Fails with `Conflict` when `(email, role)` exists.
    async fn save(&self, account: Account) -> DomainResult<()>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Account>>;

    async fn find_by_email(&self, email: &str, role: Role) -> DomainResult<Option<Account>>;

    async fn touch_login(&self, id: &str, at: DateTime<Utc>) -> DomainResult<()>;
}
