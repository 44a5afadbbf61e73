//! `SeaORM` implementation of the `AccountService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::config::SecurityConfig;
use crate::db::Store;
use crate::models::account::{CouponStatus, Tier, UserAccount};
use crate::services::account_service::{AccountError, AccountService};

pub struct SeaOrmAccountService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAccountService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

#[async_trait]
impl AccountService for SeaOrmAccountService {
    async fn create_user(
        &self,
        username: &str,
        password: &str,
        email: Option<&str>,
        tier: Tier,
    ) -> Result<Option<i32>, AccountError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AccountError::Validation(
                "Username cannot be empty".to_string(),
            ));
        }

        if password.chars().count() < self.security.min_password_length {
            return Err(AccountError::Validation(format!(
                "Password must be at least {} characters",
                self.security.min_password_length
            )));
        }

        let email = email.map(str::trim).filter(|e| !e.is_empty());

        let user_id = self
            .store
            .create_user(username, password, email, tier, &self.security)
            .await?;

        if let Some(id) = user_id {
            info!(user_id = id, username, tier = %tier, "User account created");
        }

        Ok(user_id)
    }

    async fn check_login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserAccount>, AccountError> {
        Ok(self.store.check_login(username.trim(), password).await?)
    }

    async fn get_user(&self, user_id: i32) -> Result<UserAccount, AccountError> {
        self.store
            .get_user(user_id)
            .await?
            .ok_or(AccountError::UserNotFound)
    }

    async fn verify_coupon(&self, code: &str) -> Result<CouponStatus, AccountError> {
        Ok(self.store.verify_coupon(code.trim()).await?)
    }

    async fn apply_coupon(&self, code: &str, user_id: i32) -> Result<Option<Tier>, AccountError> {
        let tier = self.store.apply_coupon(code.trim(), user_id).await?;

        if let Some(tier) = tier {
            info!(user_id, tier = %tier, "Coupon redeemed");
        }

        Ok(tier)
    }
}
