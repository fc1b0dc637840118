//! Finite-number guard shared by every numeric input.

use super::ValidationError;

/// Returns `value` if it is a finite number.
pub fn ensure_finite(field: impl Into<String>, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::invalid_format(
            field,
            format!("{} is not a finite number", value),
        ))
    }
}

/// Returns `value` if it is finite and strictly positive.
pub fn ensure_positive(field: impl Into<String>, value: f64) -> Result<f64, ValidationError> {
    let field = field.into();
    let value = ensure_finite(field.clone(), value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::out_of_range(field, 0.0, f64::MAX, value))
    }
}
