//! Internal helpers for model validation.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation and mapping logic so the engine enforces consistent invariants.

use crate::{EngineError, ResultEngine};

/// Maximum length for entity names, in characters.
pub(crate) const NAME_MAX: usize = 50;
/// Maximum length for entity descriptions, in characters.
pub(crate) const DESCRIPTION_MAX: usize = 500;

/// Trim and bound-check an entity name.
pub(crate) fn validate_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidField(format!(
            "{label} name must not be empty"
        )));
    }
    if trimmed.chars().count() > NAME_MAX {
        return Err(EngineError::InvalidField(format!(
            "{label} name must be at most {NAME_MAX} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Bound-check an entity description.
pub(crate) fn validate_description(value: &str, label: &str) -> ResultEngine<String> {
    if value.chars().count() > DESCRIPTION_MAX {
        return Err(EngineError::InvalidField(format!(
            "{label} description must be at most {DESCRIPTION_MAX} characters"
        )));
    }
    Ok(value.to_string())
}
