use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};
use tourguide_core::error::{CoreError, FieldError};
use tourguide_core::language::VALID_LANGUAGE_CODES;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce `{ error, message, details? }`
/// JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `tourguide_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The `{id}` path segment could not be extracted (e.g. invalid UTF-8).
    #[error("Invalid path: {0}")]
    InvalidPath(#[from] PathRejection),

    /// The query string could not be deserialized (e.g. a repeated `lang`).
    #[error("Invalid query string: {0}")]
    InvalidQuery(#[from] QueryRejection),

    /// The request body was not valid JSON of the expected shape.
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Extractor rejections share the body of the matching domain error.
        let core = match self {
            AppError::Core(core) => core,
            AppError::InvalidPath(rejection) => CoreError::InvalidId(rejection.body_text()),
            AppError::InvalidQuery(rejection) => {
                CoreError::InvalidLanguage(rejection.body_text())
            }
            AppError::InvalidBody(rejection) => {
                CoreError::Validation(vec![FieldError::new("body", rejection.body_text())])
            }
        };

        let (status, error, message, details): (StatusCode, &str, String, Option<Value>) =
            match &core {
                CoreError::InvalidId(msg) => (
                    StatusCode::BAD_REQUEST,
                    "Invalid scene ID",
                    "Scene ID must be a valid number".to_string(),
                    Some(json!(msg)),
                ),
                CoreError::InvalidLanguage(msg) => (
                    StatusCode::BAD_REQUEST,
                    "Invalid language parameter",
                    format!(
                        "Language must be one of: {}",
                        VALID_LANGUAGE_CODES.join(", ")
                    ),
                    Some(json!(msg)),
                ),
                CoreError::Validation(errors) => (
                    StatusCode::BAD_REQUEST,
                    "Validation error",
                    FieldError::summarize(errors),
                    Some(json!(errors)),
                ),
                CoreError::SceneNotFound { id } => (
                    StatusCode::NOT_FOUND,
                    "Scene not found",
                    format!("No scene found with ID: {id}"),
                    None,
                ),
                CoreError::StoreUnavailable(msg) => {
                    tracing::error!(error = %msg, "Scene store unavailable");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error",
                        "The scene store is temporarily unavailable. Please try again later."
                            .to_string(),
                        None,
                    )
                }
                CoreError::Store(msg) => {
                    tracing::error!(error = %msg, "Scene store error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error",
                        "An internal error occurred".to_string(),
                        None,
                    )
                }
            };

        let mut body = json!({
            "error": error,
            "message": message,
        });
        if let Some(details) = details {
            body["details"] = details;
        }

        (status, axum::Json(body)).into_response()
    }
}
