use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{ApiResponse, AppState};
use crate::models::account::{Tier, TierFeatures};

/// GET /tiers
pub async fn list_tiers(State(state): State<Arc<AppState>>) -> Json<ApiResponse<Vec<TierFeatures>>> {
    let accounts = state.account_service();
    let tiers = Tier::ALL
        .into_iter()
        .map(|tier| accounts.tier_features(tier))
        .collect();
    Json(ApiResponse::success(tiers))
}

/// GET /tiers/{tier}
/// Unknown names describe the free tier.
pub async fn get_tier(
    State(state): State<Arc<AppState>>,
    Path(tier): Path<String>,
) -> Json<ApiResponse<TierFeatures>> {
    let features = state
        .account_service()
        .tier_features(Tier::parse_or_free(&tier));
    Json(ApiResponse::success(features))
}
