use serde::{Deserialize, Serialize};

/// Error codes an identity provider may put in a failure body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidCredentials,
    Conflict,
    Validation,
    RateLimited,
    Unavailable,
    #[serde(other)]
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_codes_fall_back_to_internal() {
        let err: ApiError =
            serde_json::from_str(r#"{"code":"teapot","message":"short and stout"}"#)
                .expect("api error");
        assert_eq!(err, ApiError::new(ErrorCode::Internal, "short and stout"));
    }
}
