use axum::{
    http::StatusCode,
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::handlers;
use crate::middleware::auth_layer;
use crate::state::AppState;

pub mod health;

/// API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: true,
            message: "success".to_string(),
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: false,
            message: message.into(),
            data: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn success_msg(message: impl Into<String>) -> Self {
        Self {
            code: true,
            message: message.into(),
            data: None,
        }
    }
}

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    // Session store (in-memory; consoles are reset on restart anyway)
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_http_only(true);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/health", get(health::health_check))
        // Auth routes
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/user/current", get(handlers::auth::current_user))
        // Console routes
        .route("/console", get(handlers::department::get_console))
        .route("/console/load", post(handlers::department::load_departments))
        .route("/console/delete/open", post(handlers::department::open_delete))
        .route("/console/delete/confirm", post(handlers::department::confirm_delete))
        .route("/console/delete/close", post(handlers::department::close_delete))
        .route("/console/add/open", post(handlers::department::open_add))
        .route("/console/add/draft", post(handlers::department::edit_draft))
        .route("/console/add/submit", post(handlers::department::submit_add))
        .route("/console/add/close", post(handlers::department::close_add))
        .route("/console/info/open", post(handlers::department::open_info))
        .route("/console/info/close", post(handlers::department::close_info))
        .route("/console/managers", post(handlers::department::request_managers))
        .route("/console/managers/close", post(handlers::department::close_managers))
        .route("/console/employees", post(handlers::department::request_employees))
        .route("/console/employees/close", post(handlers::department::close_employees))
        .route("/console/selection/clear", post(handlers::department::clear_selection));

    Router::new()
        .nest("/api", api_routes)
        .fallback(fallback)
        .layer(middleware::from_fn_with_state(state.clone(), auth_layer))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Fallback handler for 404
pub async fn fallback() -> (StatusCode, Json<ApiResponse<()>>) {
    (StatusCode::NOT_FOUND, Json(ApiResponse::error("Not Found")))
}
