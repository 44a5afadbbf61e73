use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::{AccountDto, ApiError, ApiResponse, AppState};
use crate::models::account::Tier;

const SESSION_USER_KEY: &str = "user_id";

// ============================================================================
// Request Types
// ============================================================================

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// ============================================================================
// Session helpers
// ============================================================================

/// The logged-in user's id, if any.
pub async fn session_user_id(session: &Session) -> Option<i32> {
    session.get::<i32>(SESSION_USER_KEY).await.ok().flatten()
}

/// Like [`session_user_id`] but fails with 401 when nobody is logged in.
pub async fn require_user_id(session: &Session) -> Result<i32, ApiError> {
    let user_id = session_user_id(session)
        .await
        .ok_or_else(|| ApiError::Unauthorized("Not logged in".to_string()))?;
    tracing::Span::current().record("user_id", user_id);
    Ok(user_id)
}

async fn start_session(session: &Session, user_id: i32) -> Result<(), ApiError> {
    session.cycle_id().await.ok();
    session
        .insert(SESSION_USER_KEY, user_id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/register
/// Creates a free-tier account and logs it in
pub async fn register(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AccountDto>>), ApiError> {
    let accounts = state.account_service();

    let user_id = accounts
        .create_user(
            &payload.username,
            &payload.password,
            payload.email.as_deref(),
            Tier::Free,
        )
        .await?
        .ok_or_else(|| ApiError::Conflict("Username already taken".to_string()))?;

    let user = accounts.get_user(user_id).await?;
    start_session(&session, user_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(AccountDto::from(user))),
    ))
}

/// POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AccountDto>>, ApiError> {
    if payload.username.is_empty() {
        return Err(ApiError::validation("Username is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let user = state
        .account_service()
        .check_login(&payload.username, &payload.password)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    start_session(&session, user.id).await?;

    Ok(Json(ApiResponse::success(AccountDto::from(user))))
}

/// POST /auth/logout
pub async fn logout(session: Session) -> impl IntoResponse {
    let _ = session.flush().await;
    (StatusCode::OK, "Logged out")
}

/// GET /auth/me
pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<AccountDto>>, ApiError> {
    let user_id = require_user_id(&session).await?;
    let user = state.account_service().get_user(user_id).await?;

    Ok(Json(ApiResponse::success(AccountDto::from(user))))
}
