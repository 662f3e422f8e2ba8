use serde::Serialize;

use crate::types::DbId;

/// A single offending field in a scene payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Dotted path of the field, e.g. `explanations.ja`.
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Render a list of field errors as `field: message; field: message`.
    pub fn summarize(errors: &[FieldError]) -> String {
        errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid scene id: {0}")]
    InvalidId(String),

    #[error("Invalid language: {0}")]
    InvalidLanguage(String),

    #[error("Validation failed: {}", FieldError::summarize(.0))]
    Validation(Vec<FieldError>),

    #[error("Scene not found: {id}")]
    SceneNotFound { id: DbId },

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl CoreError {
    /// Shorthand for a validation failure on a single field.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        CoreError::Validation(vec![FieldError::new(field, message)])
    }

    /// Whether the error was caused by caller input rather than the store.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidId(_)
                | CoreError::InvalidLanguage(_)
                | CoreError::Validation(_)
                | CoreError::SceneNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_every_field() {
        let err = CoreError::Validation(vec![
            FieldError::new("name", "must not be empty"),
            FieldError::new("explanations.zh", "is required"),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: name: must not be empty; explanations.zh: is required"
        );
    }

    #[test]
    fn store_errors_are_not_client_errors() {
        assert!(!CoreError::Store("boom".into()).is_client_error());
        assert!(!CoreError::StoreUnavailable("pool timed out".into()).is_client_error());
        assert!(CoreError::SceneNotFound { id: 3 }.is_client_error());
        assert!(CoreError::InvalidLanguage("fr".into()).is_client_error());
    }
}
