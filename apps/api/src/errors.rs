use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::backend_client::BackendError;

/// Error returned by every handler. Rendered as `{ "error": { "code", "message" } }`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Backend(e @ BackendError::Unreachable(_)) => {
                tracing::error!("Backend unreachable: {e:?}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "BACKEND_UNAVAILABLE",
                    e.to_string(),
                )
            }
            // The backend rejected the request itself; relay its status and detail.
            AppError::Backend(BackendError::Api { status, message })
                if (400..500).contains(status) =>
            {
                tracing::warn!("Backend rejected request ({status}): {message}");
                (
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_REQUEST),
                    "BACKEND_REJECTED",
                    message.clone(),
                )
            }
            AppError::Backend(e) => {
                tracing::error!("Backend error: {e}");
                (StatusCode::BAD_GATEWAY, "BACKEND_ERROR", e.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let (status, code, message) = AppError::Validation("jd empty".into()).parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "VALIDATION_ERROR");
        assert_eq!(message, "jd empty");
    }

    #[test]
    fn test_backend_client_error_keeps_status() {
        let err = AppError::from(BackendError::Api {
            status: 422,
            message: "Invalid section index".into(),
        });
        let (status, code, message) = err.parts();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(code, "BACKEND_REJECTED");
        assert_eq!(message, "Invalid section index");
    }

    #[test]
    fn test_backend_server_error_is_bad_gateway() {
        let err = AppError::from(BackendError::Api {
            status: 500,
            message: "Brutal review failed".into(),
        });
        let (status, code, message) = err.parts();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(code, "BACKEND_ERROR");
        assert_eq!(message, "Brutal review failed");
    }

    #[test]
    fn test_backend_parse_error_is_bad_gateway() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let (status, _, _) = AppError::from(BackendError::Parse(parse)).parts();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}
