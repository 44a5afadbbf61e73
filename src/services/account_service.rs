//! Domain service for user accounts, tiers and coupons.

use thiserror::Error;

use crate::models::account::{CouponStatus, Tier, TierFeatures, UserAccount};

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("User not found")]
    UserNotFound,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AccountError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait AccountService: Send + Sync {
    /// Creates an account and returns its id; `None` when the username is taken.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Validation`] for an empty username or a short password.
    async fn create_user(
        &self,
        username: &str,
        password: &str,
        email: Option<&str>,
        tier: Tier,
    ) -> Result<Option<i32>, AccountError>;

    /// Returns the account when the credentials match; records the login.
    async fn check_login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserAccount>, AccountError>;

    async fn get_user(&self, user_id: i32) -> Result<UserAccount, AccountError>;

    async fn verify_coupon(&self, code: &str) -> Result<CouponStatus, AccountError>;

    /// Redeems a coupon for a user. `None` if the code is unknown or spent.
    async fn apply_coupon(&self, code: &str, user_id: i32) -> Result<Option<Tier>, AccountError>;

    fn tier_features(&self, tier: Tier) -> TierFeatures {
        tier.features()
    }
}
