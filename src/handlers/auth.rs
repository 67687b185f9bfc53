//! Authentication handlers
//!
//! Implements login, logout, and current user endpoints. Login is a gate
//! only: any non-empty username is accepted and gets a fresh console.

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::console::ConsoleSnapshot;
use crate::error::{ConsoleError, ConsoleResult};
use crate::middleware::auth::{CurrentConsole, SESSION_TIMESTAMP_KEY, SESSION_USER_KEY};
use crate::routes::ApiResponse;
use crate::state::AppState;

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
}

/// Current user response
#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    pub username: String,
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<LoginRequest>,
) -> ConsoleResult<Json<ApiResponse<ConsoleSnapshot>>> {
    let username = req.username.trim();
    if username.is_empty() {
        return Err(ConsoleError::Validation("username is required".to_string()));
    }

    session
        .insert(SESSION_USER_KEY, username)
        .await
        .map_err(|e| ConsoleError::Internal(format!("failed to save session: {}", e)))?;
    if let Err(e) = session
        .insert(SESSION_TIMESTAMP_KEY, chrono::Utc::now().timestamp())
        .await
    {
        tracing::error!("Failed to save session timestamp: {}", e);
    }

    let console = state.open_console(username);
    tracing::info!("User logged in: {}", username);

    // A failed listing is recorded on the console; the login itself succeeds
    if let Err(e) = console.load().await {
        tracing::warn!("Initial department load failed for {}: {}", username, e);
    }

    Ok(Json(ApiResponse::success(console.snapshot().await)))
}

/// POST /api/logout
pub async fn logout(
    State(state): State<AppState>,
    session: Session,
    Extension(current): Extension<CurrentConsole>,
) -> ConsoleResult<Json<ApiResponse<()>>> {
    session
        .flush()
        .await
        .map_err(|e| ConsoleError::Internal(format!("failed to flush session: {}", e)))?;

    state.close_console(&current.username);
    tracing::info!("User logged out: {}", current.username);

    Ok(Json(ApiResponse::success_msg("logout success")))
}

/// GET /api/user/current
pub async fn current_user(
    Extension(current): Extension<CurrentConsole>,
) -> Json<ApiResponse<CurrentUserResponse>> {
    Json(ApiResponse::success(CurrentUserResponse {
        username: current.username,
    }))
}
