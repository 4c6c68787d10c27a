use shared::{
    domain::FieldName,
    error::{ApiError, ErrorCode},
};
use thiserror::Error;

/// Why a single field failed validation. Never leaves the form session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("required")]
    Required,
    #[error("must be a valid email address")]
    InvalidEmail,
    #[error("must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("must be a date in YYYY-MM-DD format")]
    InvalidDate,
    #[error("must be exactly {len} digits")]
    InvalidShortCode { len: usize },
}

/// Misuse of the session API, e.g. submitting while a request is in flight.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("session is not editable (state: {state})")]
    NotEditable { state: &'static str },
    #[error("form has invalid fields: {}", join_fields(.0))]
    InvalidFields(Vec<FieldName>),
    #[error("onboarding flow already finished")]
    Finished,
    #[error("onboarding session was disposed")]
    Disposed,
}

fn join_fields(fields: &[FieldName]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Failure reported by the identity provider. Always recoverable by resubmitting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),
    #[error("account already exists: {0}")]
    AlreadyRegistered(String),
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
    #[error("unexpected identity provider failure: {0}")]
    Unexpected(String),
}

impl AuthError {
    /// Classifies a free-text provider failure.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();
        if lower.contains("409")
            || lower.contains("already exists")
            || lower.contains("already registered")
            || lower.contains("conflict")
        {
            AuthError::AlreadyRegistered(message)
        } else if lower.contains("401")
            || lower.contains("403")
            || lower.contains("unauthorized")
            || lower.contains("credential")
            || lower.contains("wrong password")
            || lower.contains("incorrect password")
        {
            AuthError::InvalidCredentials(message)
        } else if lower.contains("timeout")
            || lower.contains("timed out")
            || lower.contains("connection")
            || lower.contains("network")
            || lower.contains("unavailable")
            || lower.contains("rate limit")
        {
            AuthError::Unavailable(message)
        } else if lower.contains("invalid")
            || lower.contains("missing")
            || lower.contains("must")
        {
            AuthError::Rejected(message)
        } else {
            AuthError::Unexpected(message)
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            AuthError::InvalidCredentials(detail)
            | AuthError::AlreadyRegistered(detail)
            | AuthError::Rejected(detail)
            | AuthError::Unavailable(detail)
            | AuthError::Unexpected(detail) => detail,
        }
    }

    /// Message shown to the user in the form's error banner.
    pub fn display_message(&self) -> String {
        match self {
            AuthError::InvalidCredentials(_) => {
                "Invalid email or password. Please try again.".to_string()
            }
            AuthError::AlreadyRegistered(_) => {
                "An account with this email already exists. Try signing in instead.".to_string()
            }
            AuthError::Rejected(detail) => {
                format!("Your details were rejected: {detail}")
            }
            AuthError::Unavailable(_) => {
                "The sign-in service is unreachable right now; check your connection and retry."
                    .to_string()
            }
            AuthError::Unexpected(_) => "Something went wrong. Please try again.".to_string(),
        }
    }
}

impl From<ApiError> for AuthError {
    fn from(value: ApiError) -> Self {
        match value.code {
            ErrorCode::InvalidCredentials => AuthError::InvalidCredentials(value.message),
            ErrorCode::Conflict => AuthError::AlreadyRegistered(value.message),
            ErrorCode::Validation => AuthError::Rejected(value.message),
            ErrorCode::RateLimited | ErrorCode::Unavailable => {
                AuthError::Unavailable(value.message)
            }
            ErrorCode::Internal => AuthError::Unexpected(value.message),
        }
    }
}
