//! Input validation helpers
//!
//! Centralized text length constants and validation functions used by the
//! CRUD handlers, plus conversion of `validator` derive output into the
//! application error type.

use rust_decimal::Decimal;
use shared::AppError;
use validator::{ValidationErrors, ValidationErrorsKind};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product names, payment method labels, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Notes and delivery instructions
pub const MAX_NOTE_LEN: usize = 500;

/// Address lines
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate that a price is not negative.
pub fn validate_non_negative_price(price: Decimal, field: &str) -> Result<(), AppError> {
    if price.is_sign_negative() {
        return Err(AppError::validation(format!("{field} cannot be negative")));
    }
    Ok(())
}

/// Validate that a quantity is not negative.
pub fn validate_non_negative_quantity(quantity: i64, field: &str) -> Result<(), AppError> {
    if quantity < 0 {
        return Err(AppError::validation(format!("{field} cannot be negative")));
    }
    Ok(())
}

/// Convert `validator` derive output into a single validation error with
/// per-field details.
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut err = AppError::validation("Validation failed");
    for (field, kind) in errors.errors() {
        if let ValidationErrorsKind::Field(field_errors) = kind
            && let Some(first) = field_errors.first()
        {
            let message = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| first.code.to_string());
            err = err.with_detail(field.to_string(), serde_json::Value::String(message));
        }
    }
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Tomatoes", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(201), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_non_negative_price() {
        assert!(validate_non_negative_price(Decimal::ZERO, "price").is_ok());
        assert!(validate_non_negative_price(Decimal::from(-1), "price").is_err());
    }
}
