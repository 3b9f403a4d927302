use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::prose::ProseError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// `Input`, `Content` and `ExternalDependency` are the three kinds the pipeline
/// itself produces; each carries enough structure (kind + offending field) for a
/// caller to build a user-facing message. Nothing here is retried internally.
#[derive(Debug, Error)]
pub enum AppError {
    /// A mandatory profile field is missing or malformed. Caller must fix the input.
    #[error("Invalid input in '{field}': {message}")]
    Input { field: String, message: String },

    /// The renderer cannot place required content. Fatal for that render call.
    #[error("Cannot render '{field}': {message}")]
    Content { field: String, message: String },

    /// The prose collaborator was unavailable or timed out.
    #[error("External dependency error: {0}")]
    ExternalDependency(#[from] ProseError),

    /// Malformed request body or query (not a pipeline error).
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn input(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Input {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn content(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Content {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Machine-readable error code, stable across releases.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Input { .. } => "INPUT_ERROR",
            AppError::Content { .. } => "CONTENT_ERROR",
            AppError::ExternalDependency(_) => "EXTERNAL_DEPENDENCY_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// The offending field, when the error is tied to one.
    pub fn field(&self) -> Option<&str> {
        match self {
            AppError::Input { field, .. } | AppError::Content { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Input { .. } => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Content { .. } => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            AppError::ExternalDependency(e) => {
                tracing::warn!("External dependency error: {e}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "The prose generator is currently unavailable".to_string(),
                )
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut error = json!({
            "code": self.code(),
            "message": message,
        });
        if let Some(field) = self.field() {
            error["field"] = json!(field);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_carries_field() {
        let err = AppError::input("name", "name is required");
        assert_eq!(err.code(), "INPUT_ERROR");
        assert_eq!(err.field(), Some("name"));
        assert!(err.to_string().contains("name is required"));
    }

    #[test]
    fn test_content_error_maps_to_422() {
        let response = AppError::content("experience", "nothing to render").into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_external_dependency_maps_to_503() {
        let err: AppError = ProseError::Timeout { after_ms: 10 }.into();
        assert_eq!(err.code(), "EXTERNAL_DEPENDENCY_ERROR");
        assert_eq!(err.field(), None);
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
