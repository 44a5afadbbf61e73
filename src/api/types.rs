use serde::{Deserialize, Serialize};

use crate::models::account::{Tier, TierFeatures, UserAccount};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AccountDto {
    #[serde(flatten)]
    pub user: UserAccount,
    pub features: TierFeatures,
}

impl From<UserAccount> for AccountDto {
    fn from(user: UserAccount) -> Self {
        let features = user.tier.features();
        Self { user, features }
    }
}

#[derive(Debug, Serialize)]
pub struct FavoriteStatusDto {
    pub asin: String,
    pub is_favorite: bool,
}

#[derive(Debug, Serialize)]
pub struct RedeemedDto {
    pub tier: Tier,
    pub features: TierFeatures,
}

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: String,
    pub uptime: u64,
    pub database: bool,
    pub live_scraping: bool,
    pub metrics_enabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<u64>,
}
