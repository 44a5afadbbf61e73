use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::session_user_id;
use super::{ApiError, ApiResponse, AppState, FavoriteStatusDto};
use crate::models::favorite::FavoriteProduct;

#[derive(Debug, Deserialize)]
pub struct ToggleFavoriteRequest {
    pub notes: Option<String>,
}

/// Full ASINs are 10 characters; unresolved short-link codes can be 7.
fn validate_product_id(asin: &str) -> Result<(), ApiError> {
    if (7..=10).contains(&asin.len()) && asin.bytes().all(|b| b.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(ApiError::validation(format!("Invalid product ID: {asin}")))
    }
}

/// GET /favorites
pub async fn list_favorites(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<FavoriteProduct>>>, ApiError> {
    let favorites = state.store().list_favorites().await?;
    Ok(Json(ApiResponse::success(favorites)))
}

/// GET /favorites/{asin}
pub async fn favorite_status(
    State(state): State<Arc<AppState>>,
    Path(asin): Path<String>,
) -> Result<Json<ApiResponse<FavoriteStatusDto>>, ApiError> {
    validate_product_id(&asin)?;
    let is_favorite = state.store().is_favorite(&asin).await?;
    Ok(Json(ApiResponse::success(FavoriteStatusDto { asin, is_favorite })))
}

/// POST /favorites/{asin}/toggle
pub async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(asin): Path<String>,
    payload: Option<Json<ToggleFavoriteRequest>>,
) -> Result<Json<ApiResponse<FavoriteStatusDto>>, ApiError> {
    validate_product_id(&asin)?;

    let notes = payload.and_then(|Json(p)| p.notes);
    let notes = notes.as_deref().map(str::trim).filter(|n| !n.is_empty());
    let user_id = session_user_id(&session).await;

    let is_favorite = state
        .store()
        .toggle_favorite(&asin, notes, user_id)
        .await?;

    tracing::info!(asin = %asin, is_favorite, "Favorite toggled");

    Ok(Json(ApiResponse::success(FavoriteStatusDto { asin, is_favorite })))
}
