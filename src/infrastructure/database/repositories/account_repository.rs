//! SeaORM implementation of AccountRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use super::mapping::{account_from_model, db_err, insert_err, role_to_db};
use crate::domain::account::{Account, AccountRepository, Role};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::account;

pub struct SeaOrmAccountRepository {
    db: DatabaseConnection,
}

impl SeaOrmAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountRepository for SeaOrmAccountRepository {
    async fn save(&self, a: Account) -> DomainResult<()> {
        debug!("Saving {} account: {}", a.role, a.email);

        let model = account::ActiveModel {
            id: Set(a.id),
            name: Set(a.name),
            email: Set(a.email),
            phone: Set(a.phone),
            password_hash: Set(a.password_hash),
            role: Set(role_to_db(a.role)),
            created_at: Set(a.created_at),
            updated_at: Set(a.updated_at),
            last_login_at: Set(a.last_login_at),
        };
        model
            .insert(&self.db)
            .await
            .map_err(insert_err("account with this email"))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Account>> {
        let model = account::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(account_from_model))
    }

    async fn find_by_email(&self, email: &str, role: Role) -> DomainResult<Option<Account>> {
        let model = account::Entity::find()
            .filter(account::Column::Email.eq(email.trim().to_ascii_lowercase()))
            .filter(account::Column::Role.eq(role_to_db(role)))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(account_from_model))
    }

    async fn touch_login(&self, id: &str, at: DateTime<Utc>) -> DomainResult<()> {
        let result = account::Entity::update_many()
            .col_expr(account::Column::LastLoginAt, Some(at).into())
            .col_expr(account::Column::UpdatedAt, at.into())
            .filter(account::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Account", id));
        }
        Ok(())
    }
}
