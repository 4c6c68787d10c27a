//! Per-field validation, independent of the rest of the form.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    error::ValidationError,
    schema::{FieldKind, FieldSpec},
};

/// Minimum password length in characters.
pub const DEFAULT_PASSWORD_MIN_LEN: usize = 8;
/// Digits in the SSN short code (last four).
pub const DEFAULT_SHORT_CODE_LEN: usize = 4;
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Tunable thresholds for password and short-code rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    pub password_min_len: usize,
    pub short_code_len: usize,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            password_min_len: DEFAULT_PASSWORD_MIN_LEN,
            short_code_len: DEFAULT_SHORT_CODE_LEN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(ValidationError),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(err) => Some(err),
        }
    }
}

impl From<Result<(), ValidationError>> for ValidationResult {
    fn from(value: Result<(), ValidationError>) -> Self {
        match value {
            Ok(()) => ValidationResult::Valid,
            Err(err) => ValidationResult::Invalid(err),
        }
    }
}

pub fn validate(
    spec: &FieldSpec,
    raw: Option<&str>,
    policy: &ValidationPolicy,
) -> ValidationResult {
    let value = match raw {
        Some(value) if !value.is_empty() => value,
        _ if spec.required => return ValidationResult::Invalid(ValidationError::Required),
        _ => return ValidationResult::Valid,
    };

    let checked = match spec.kind {
        FieldKind::Text => Ok(()),
        FieldKind::Email => validate_email(value),
        FieldKind::Password => validate_password(value, policy.password_min_len),
        FieldKind::Date => validate_date(value),
        FieldKind::ShortCode => validate_short_code(value, policy.short_code_len),
    };
    checked.into()
}

fn validate_email(value: &str) -> Result<(), ValidationError> {
    if value.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidEmail);
    }

    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ValidationError::InvalidEmail);
    };

    let domain_ok = domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..");
    if local.is_empty() || !domain_ok {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

fn validate_password(value: &str, min: usize) -> Result<(), ValidationError> {
    if value.chars().count() < min {
        return Err(ValidationError::PasswordTooShort { min });
    }
    Ok(())
}

/// Strict `YYYY-MM-DD`; the raw string is forwarded to the provider as-is.
fn validate_date(value: &str) -> Result<(), ValidationError> {
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate)?;
    if date.format(DATE_FORMAT).to_string() != value {
        return Err(ValidationError::InvalidDate);
    }
    Ok(())
}

fn validate_short_code(value: &str, len: usize) -> Result<(), ValidationError> {
    if value.len() != len || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidShortCode { len });
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/validator_tests.rs"]
mod tests;
