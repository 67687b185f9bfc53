//! Login gate
//!
//! Console routes need a session username; there is no authorization beyond
//! that.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use crate::console::ConsoleSession;
use crate::error::ConsoleError;
use crate::state::AppState;

/// Session key for storing username
pub const SESSION_USER_KEY: &str = "user";
pub const SESSION_TIMESTAMP_KEY: &str = "timestamp";

/// Console of the logged-in user, inserted into request extensions
#[derive(Clone)]
pub struct CurrentConsole {
    pub username: String,
    pub session: ConsoleSession,
}

/// Paths that don't require a login
fn is_public_path(path: &str) -> bool {
    if !path.starts_with("/api") {
        return true;
    }
    path == "/api/login" || path == "/api/health"
}

/// Authentication middleware
pub async fn auth_layer(
    State(state): State<AppState>,
    session: Session,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    if is_public_path(&path) {
        return next.run(request).await;
    }

    let username: Option<String> = session.get(SESSION_USER_KEY).await.unwrap_or(None);

    let Some(username) = username else {
        return ConsoleError::Unauthorized.into_response();
    };

    let Some(console) = state.console(&username) else {
        tracing::warn!("No console for session user {}", username);
        return ConsoleError::Unauthorized.into_response();
    };

    request.extensions_mut().insert(CurrentConsole {
        username,
        session: console,
    });

    next.run(request).await
}
