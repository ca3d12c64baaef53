//! Field-level checks shared by the input models' `validate()` methods.

use regex::Regex;
use rust_decimal::Decimal;
use std::sync::LazyLock;

use crate::errors::{Result, ValidationError};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

pub(crate) fn fail<T>(field: &str, message: &str) -> Result<T> {
    Err(ValidationError::field(field, message).into())
}

pub fn require_positive(field: &str, value: Decimal, message: &str) -> Result<()> {
    if value <= Decimal::ZERO {
        return fail(field, message);
    }
    Ok(())
}

pub fn require_non_negative(field: &str, value: Decimal, message: &str) -> Result<()> {
    if value < Decimal::ZERO {
        return fail(field, message);
    }
    Ok(())
}

/// Rejects values above `max`.
pub fn require_at_most(field: &str, value: Decimal, max: Decimal, label: &str) -> Result<()> {
    if value > max {
        return fail(field, &format!("{} cannot exceed {}", label, max));
    }
    Ok(())
}

/// Rejects values whose absolute value exceeds `max`.
pub fn require_magnitude_at_most(
    field: &str,
    value: Decimal,
    max: Decimal,
    label: &str,
) -> Result<()> {
    require_at_most(field, value.abs(), max, label)
}

pub fn require_positive_integer(field: &str, value: Decimal, message: &str) -> Result<()> {
    if value <= Decimal::ZERO || !value.fract().is_zero() {
        return fail(field, message);
    }
    Ok(())
}

/// Checks the trimmed character length of `value` against `min..=max`.
pub fn require_length(
    field: &str,
    value: &str,
    min: usize,
    max: usize,
    label: &str,
) -> Result<()> {
    let len = value.trim().chars().count();
    if len < min {
        return fail(field, &format!("{} is required", label));
    }
    if len > max {
        return fail(field, &format!("{} is too long", label));
    }
    Ok(())
}

pub fn require_max_length(field: &str, value: &str, max: usize, message: &str) -> Result<()> {
    if value.chars().count() > max {
        return fail(field, message);
    }
    Ok(())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}
