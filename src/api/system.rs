//! System status endpoint.

use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, SystemStatus};

/// `GET /api/system/status`
pub async fn get_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<SystemStatus>>, ApiError> {
    let database = state.store().ping().await.is_ok();
    let (live_scraping, metrics_enabled) = {
        let config = state.config().read().await;
        (
            config.scraper.live_enabled,
            config.observability.metrics_enabled,
        )
    };

    Ok(Json(ApiResponse::success(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: state.start_time.elapsed().as_secs(),
        database,
        live_scraping,
        metrics_enabled,
    })))
}
