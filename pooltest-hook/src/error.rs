//! Error types for pooltest-hook

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use pooltest_common::StorageError;
use serde_json::json;
use thiserror::Error;

/// API error type
///
/// Display strings are what clients see. Storage detail stays in the
/// source error and only reaches the logs.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Wrong HTTP verb (405); carries the `Allow` header value
    #[error("Invalid request method")]
    MethodNotAllowed(&'static str),

    /// Content-Type is not exactly application/json (415)
    #[error("Unsupported Media Type")]
    UnsupportedMediaType,

    /// Body is not a JSON object (400)
    #[error("Invalid JSON")]
    InvalidJson(#[source] serde_json::Error),

    /// Backend rejected the write (500)
    #[error("Failed to store payload")]
    StoreFailed(#[source] StorageError),

    /// Backend could not list readings (500)
    #[error("Failed to retrieve readings")]
    ListFailed(#[source] StorageError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::StoreFailed(_) | ApiError::ListFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::MethodNotAllowed(_) => "METHOD_NOT_ALLOWED",
            ApiError::UnsupportedMediaType => "UNSUPPORTED_MEDIA_TYPE",
            ApiError::InvalidJson(_) => "INVALID_JSON",
            ApiError::StoreFailed(_) | ApiError::ListFailed(_) => "STORAGE_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        }));

        match self {
            ApiError::MethodNotAllowed(allow) => {
                (status, [(header::ALLOW, allow)], body).into_response()
            }
            _ => (status, body).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_detail_not_in_client_message() {
        let err = ApiError::StoreFailed(StorageError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "/secret/path denied",
        )));

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Failed to store payload");
        assert!(!err.to_string().contains("/secret/path"));
    }

    #[test]
    fn test_client_error_statuses() {
        assert_eq!(ApiError::MethodNotAllowed("POST").status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(ApiError::UnsupportedMediaType.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(ApiError::InvalidJson(parse_err).status(), StatusCode::BAD_REQUEST);
    }
}
