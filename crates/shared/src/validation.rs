//! Common validation utilities.
//!
//! Field-level constraints that the `validator` derive cannot express
//! directly. Each function mirrors the shape of a derive check so results
//! can be merged into the same `ValidationErrors` map.

use validator::{ValidationError, ValidationErrors};

/// Builds a validation error with a human-readable message.
pub fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Validates that a required text field contains something other than
/// whitespace.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(error("blank", "Must not be empty"))
    } else {
        Ok(())
    }
}

/// Validates that a percentage lies in 0..=100.
pub fn validate_percentage(value: i32) -> Result<(), ValidationError> {
    if (0..=100).contains(&value) {
        Ok(())
    } else {
        Err(error("percentage_range", "Percentage must be between 0 and 100"))
    }
}

/// Validates that every entry of a string list is non-blank.
pub fn validate_string_list(items: &[String]) -> Result<(), ValidationError> {
    if items.iter().any(|item| item.trim().is_empty()) {
        return Err(error("list_entry_blank", "List entries must not be empty"));
    }
    Ok(())
}

/// Wraps a single field error into a `ValidationErrors` map.
pub fn single_field_error(field: &'static str, err: ValidationError) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, err);
    errors
}
