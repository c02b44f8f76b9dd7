//! Input validation helpers
//!
//! SQLite TEXT has no built-in length enforcement, so limits live here.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Names, employee types, job titles, manager names
pub const MAX_NAME_LEN: usize = 200;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// ISO dates (`YYYY-MM-DD`) plus some slack
pub const MAX_DATE_LEN: usize = 32;

// ── Validation helpers ──────────────────────────────────────────────

/// Blank means absent, empty, or whitespace only.
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Take a required field, recording its name in `missing` when blank.
pub fn take_required(
    value: Option<String>,
    field: &'static str,
    missing: &mut Vec<&'static str>,
) -> String {
    if is_blank(value.as_deref()) {
        missing.push(field);
        return String::new();
    }
    value.unwrap_or_default()
}

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    validate_len(value, field, max_len)
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: Option<&str>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    match value {
        Some(v) => validate_len(v, field, max_len),
        None => Ok(()),
    }
}

fn validate_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        )));
    }
    Ok(())
}
