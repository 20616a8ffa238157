//! Form Validation
//!
//! Checks run before a request leaves the browser, so the backend only
//! sees well-formed input.

use crate::error::{AppError, AppResult};

pub const MIN_PASSWORD_LEN: usize = 6;

fn invalid(message: impl Into<String>) -> AppError {
    AppError::Validation(message.into())
}

/// Trimmed value, or an error naming the field
pub fn required<'a>(label: &str, value: &'a str) -> AppResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(invalid(format!("{label} is required")));
    }
    Ok(value)
}

pub fn email(value: &str) -> AppResult<&str> {
    let value = required("Email", value)?;
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') && !domain.starts_with('.') => Ok(value),
        _ => Err(invalid("Enter a valid email address")),
    }
}

pub fn password(password: &str, confirm: Option<&str>) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(invalid(format!("Password must be at least {MIN_PASSWORD_LEN} characters")));
    }
    if let Some(confirm) = confirm {
        if confirm != password {
            return Err(invalid("Passwords do not match"));
        }
    }
    Ok(())
}

/// Optional field: blank becomes `None`
pub fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Amount typed by the user, in rupees
pub fn amount(raw: &str) -> AppResult<f64> {
    let value: f64 = required("Amount", raw)?
        .parse()
        .map_err(|_| invalid("Amount must be a number"))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid("Amount must be greater than zero"));
    }
    Ok(value)
}

/// Share codes are opaque; only surrounding whitespace is dropped
pub fn cart_code(raw: &str) -> AppResult<String> {
    required("Cart code", raw).map(str::to_string)
}
