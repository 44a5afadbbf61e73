use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::require_user_id;
use super::{ApiError, ApiResponse, AppState, RedeemedDto};
use crate::models::account::CouponStatus;

#[derive(Debug, Deserialize)]
pub struct RedeemRequest {
    pub code: String,
}

/// GET /coupons/{code}
pub async fn check_coupon(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<CouponStatus>>, ApiError> {
    let status = state.account_service().verify_coupon(&code).await?;
    Ok(Json(ApiResponse::success(status)))
}

/// POST /coupons/redeem
/// Upgrades the logged-in user's tier
pub async fn redeem_coupon(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<RedeemRequest>,
) -> Result<Json<ApiResponse<RedeemedDto>>, ApiError> {
    let user_id = require_user_id(&session).await?;

    if payload.code.trim().is_empty() {
        return Err(ApiError::validation("Coupon code is required"));
    }

    let tier = state
        .account_service()
        .apply_coupon(&payload.code, user_id)
        .await?
        .ok_or_else(|| ApiError::validation("Coupon code is invalid or has already been used"))?;

    Ok(Json(ApiResponse::success(RedeemedDto {
        tier,
        features: tier.features(),
    })))
}
