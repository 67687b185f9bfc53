use axum::{extract::State, response::Json};
use serde::Serialize;

use super::ApiResponse;
use crate::config::DirectoryMode;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub directory: DirectoryMode,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<HealthStatus>> {
    Json(ApiResponse::success(HealthStatus {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        directory: state.config.directory.mode,
    }))
}
