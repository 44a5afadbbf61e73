use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::session_user_id;
use super::{ApiError, ApiResponse, AppState};
use crate::services::{LookupOptions, LookupOutcome};

#[derive(Debug, Deserialize)]
pub struct LookupRequest {
    pub url: String,
    #[serde(default)]
    pub demo: bool,
    pub search_term: Option<String>,
}

/// POST /lookup
pub async fn lookup_product(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<LookupRequest>,
) -> Result<Json<ApiResponse<LookupOutcome>>, ApiError> {
    if payload.url.trim().is_empty() {
        return Err(ApiError::validation("URL is required"));
    }

    let options = LookupOptions {
        force_demo: payload.demo,
        user_id: session_user_id(&session).await,
        search_term: payload.search_term,
    };

    let outcome = state
        .lookup_service()
        .lookup(payload.url.trim(), &options)
        .await?;

    Ok(Json(ApiResponse::success(outcome)))
}

/// GET /products/{asin}
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(asin): Path<String>,
) -> Result<Json<ApiResponse<LookupOutcome>>, ApiError> {
    let outcome = state.lookup_service().product(&asin).await?;
    Ok(Json(ApiResponse::success(outcome)))
}
