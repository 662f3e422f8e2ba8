//! Structural validation for scene requests.
//!
//! Every function here runs before the store is touched. Failures are
//! returned as [`CoreError`] values carrying the offending input.

use crate::error::{CoreError, FieldError};
use crate::language::{Language, VALID_LANGUAGE_CODES};
use crate::scene::{Explanations, NewScene, SceneInput};
use crate::types::DbId;

/// Parse a path segment as a scene id.
///
/// Only plain ASCII digits are accepted: no sign, no whitespace, no
/// trailing garbage. Values beyond `i64::MAX` are rejected too.
pub fn parse_scene_id(raw: &str) -> Result<DbId, CoreError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::InvalidId(format!(
            "'{raw}' is not a valid scene id. Scene ID must be a non-negative integer"
        )));
    }
    raw.parse::<DbId>()
        .map_err(|_| CoreError::InvalidId(format!("'{raw}' is out of range for a scene id")))
}

/// Parse the `lang` query parameter. Absent means [`Language::DEFAULT`];
/// anything outside the supported set, including an empty value, is an
/// error.
pub fn parse_language(raw: Option<&str>) -> Result<Language, CoreError> {
    match raw {
        None => Ok(Language::DEFAULT),
        Some(code) => code.parse(),
    }
}

/// Validate a create/update body into a [`NewScene`].
///
/// Collects every violation rather than stopping at the first:
/// - `name` must be present and not blank
/// - `imageUrl` must be present (its format is not checked here)
/// - `explanations` must hold exactly `ja`, `en` and `zh`, none blank
pub fn validate_scene_input(input: SceneInput) -> Result<NewScene, CoreError> {
    let mut errors = Vec::new();

    let name = match input.name {
        Some(name) if !name.trim().is_empty() => Some(name),
        Some(_) => {
            errors.push(FieldError::new("name", "must not be empty"));
            None
        }
        None => {
            errors.push(FieldError::new("name", "is required"));
            None
        }
    };

    if input.image_url.is_none() {
        errors.push(FieldError::new("imageUrl", "is required"));
    }

    let explanations = match input.explanations {
        Some(raw) => {
            let mut explanations = Explanations::default();
            for (code, text) in raw {
                match code.parse::<Language>() {
                    Ok(lang) if text.trim().is_empty() => {
                        errors.push(FieldError::new(
                            format!("explanations.{lang}"),
                            "must not be empty",
                        ));
                    }
                    Ok(lang) => explanations.insert(lang, text),
                    Err(_) => errors.push(FieldError::new(
                        format!("explanations.{code}"),
                        format!(
                            "unsupported language. Must be one of: {}",
                            VALID_LANGUAGE_CODES.join(", ")
                        ),
                    )),
                }
            }
            Some(explanations)
        }
        None => {
            errors.push(FieldError::new("explanations", "is required"));
            None
        }
    };

    if let Some(explanations) = &explanations {
        for lang in Language::ALL {
            let field = format!("explanations.{lang}");
            if explanations.get(lang).is_none() && !errors.iter().any(|e| e.field == field) {
                errors.push(FieldError::new(field, "is required"));
            }
        }
    }

    match (name, input.image_url, explanations) {
        (Some(name), Some(image_url), Some(explanations)) if errors.is_empty() => Ok(NewScene {
            name,
            image_url,
            explanations,
        }),
        _ => Err(CoreError::Validation(errors)),
    }
}
