//! Input validation helpers

use chrono::NaiveDate;
use serde_json::Value;

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Employee names
pub const MAX_NAME_LEN: usize = 200;

/// Reasons and vacation notes
pub const MAX_NOTE_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Required string: present, non-empty after trim, within the length limit.
/// Returns the trimmed value.
pub fn required_text(value: Option<String>, field: &str, max_len: usize) -> Result<String, AppError> {
    let value = value.unwrap_or_default();
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(value.to_string())
}

/// Optional string within the length limit, trimmed, empty when absent
pub fn optional_text(value: Option<String>, field: &str, max_len: usize) -> Result<String, AppError> {
    let value = value.unwrap_or_default().trim().to_string();
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(value)
}

/// Required calendar date (`YYYY-MM-DD` or ISO date-time text)
pub fn required_date(value: Option<String>, field: &str) -> Result<NaiveDate, AppError> {
    let raw = value.unwrap_or_default();
    if raw.trim().is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    shared::dates::parse_date(&raw)
        .ok_or_else(|| AppError::validation(format!("{field} is not a valid date: {raw}")))
}

/// Required JSON number (numeric strings are rejected)
pub fn required_number(value: Option<Value>, field: &str) -> Result<f64, AppError> {
    value
        .as_ref()
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite())
        .ok_or_else(|| AppError::validation(format!("{field} must be a number")))
}
