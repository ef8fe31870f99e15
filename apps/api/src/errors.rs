use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::export::ExportError;
use crate::render::RenderError;
use crate::spotify::UpstreamError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream error: {0}")]
    Upstream(UpstreamError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        if err.is_not_found() {
            AppError::NotFound(format!("Playlist not found: {err}"))
        } else {
            AppError::Upstream(err)
        }
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Upstream(e) => e.into(),
            ExportError::Render(e) => AppError::Render(e),
            ExportError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Upstream(UpstreamError::Timeout(what)) => {
                tracing::error!("Upstream timeout: {what}");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "UPSTREAM_TIMEOUT",
                    "The music service did not respond in time".to_string(),
                )
            }
            AppError::Upstream(e) => {
                tracing::error!("Upstream error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    "The music service request failed".to_string(),
                )
            }
            AppError::Render(e) => {
                tracing::error!("Render error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    "The card sheet could not be rendered".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

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

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_upstream_status_mapping() {
        let not_found = UpstreamError::Status {
            status: 404,
            message: "Resource not found".to_string(),
        };
        let err: AppError = not_found.into();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(status_of(err), StatusCode::NOT_FOUND);

        let unauthorized = UpstreamError::Status {
            status: 401,
            message: "Invalid access token".to_string(),
        };
        assert_eq!(status_of(unauthorized.into()), StatusCode::BAD_GATEWAY);

        let timeout = UpstreamError::Timeout("page at offset 100".to_string());
        assert_eq!(status_of(timeout.into()), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn test_export_error_conversion() {
        let err: AppError = ExportError::Internal("join failed".to_string()).into();
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);

        let err: AppError = ExportError::Render(RenderError::Layout("too tall".to_string())).into();
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_is_bad_request() {
        assert_eq!(
            status_of(AppError::Validation("bad id".to_string())),
            StatusCode::BAD_REQUEST
        );
    }
}
