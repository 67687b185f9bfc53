use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::console::DialogKind;

/// Failure reported by the remote directory.
///
/// The directory gives no structured error codes, so this only records where
/// the call failed and whatever text came back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Directory unreachable: {0}")]
    Transport(String),

    #[error("Directory returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed directory response: {0}")]
    Decode(String),

    #[error("Directory rejected request: {0}")]
    Rejected(String),

    #[error("Not found in directory: {0}")]
    NotFound(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ServiceError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ServiceError::Status {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ServiceError::Transport(err.to_string())
        }
    }
}

/// Console error types
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Login required")]
    Unauthorized,

    #[error("Dialog is not open: {0}")]
    DialogClosed(DialogKind),

    #[error("Department not loaded: {0}")]
    UnknownDepartment(i64),

    #[error("Response superseded by a newer request")]
    Superseded,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    code: u16,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ConsoleError {
    fn into_response(self) -> Response {
        let (status, message, details) = match &self {
            ConsoleError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized", None),
            ConsoleError::DialogClosed(kind) => {
                (StatusCode::CONFLICT, "Dialog Closed", Some(kind.to_string()))
            }
            ConsoleError::UnknownDepartment(id) => {
                (StatusCode::NOT_FOUND, "Not Found", Some(format!("department {}", id)))
            }
            ConsoleError::Superseded => (StatusCode::CONFLICT, "Superseded", None),
            ConsoleError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "Validation Error", Some(msg.clone()))
            }
            ConsoleError::Service(err) => {
                tracing::warn!("Directory error: {}", err);
                (StatusCode::BAD_GATEWAY, "Directory Error", Some(err.to_string()))
            }
            ConsoleError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", None)
            }
        };

        let body = ErrorResponse {
            code: status.as_u16(),
            message: message.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for console operations
pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Helper trait for converting Option to ConsoleError::UnknownDepartment
pub trait OptionExt<T> {
    fn ok_or_unknown(self, id: i64) -> ConsoleResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_unknown(self, id: i64) -> ConsoleResult<T> {
        self.ok_or(ConsoleError::UnknownDepartment(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response() {
        let err = ConsoleError::UnknownDepartment(9);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let err = ConsoleError::Service(ServiceError::Transport("refused".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_option_ext() {
        let opt: Option<i32> = None;
        let result = opt.ok_or_unknown(3);
        assert!(matches!(result, Err(ConsoleError::UnknownDepartment(3))));
    }

    #[test]
    fn test_service_error_display() {
        let err = ServiceError::Status {
            status: 409,
            message: "has children".to_string(),
        };
        assert_eq!(err.to_string(), "Directory returned 409: has children");
    }
}
