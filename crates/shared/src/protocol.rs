use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::FlowMode;

const REDACTED: &str = "<redacted>";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInPayload {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for SignInPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInPayload")
            .field("email", &self.email)
            .field("password", &REDACTED)
            .finish()
    }
}

/// Full KYC profile plus credentials sent when creating an account.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpPayload {
    pub first_name: String,
    pub last_name: String,
    pub address1: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub date_of_birth: String,
    pub ssn: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for SignUpPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpPayload")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("address1", &self.address1)
            .field("city", &self.city)
            .field("state", &self.state)
            .field("postal_code", &self.postal_code)
            .field("date_of_birth", &self.date_of_birth)
            .field("ssn", &REDACTED)
            .field("email", &self.email)
            .field("password", &REDACTED)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum SubmitRequest {
    SignIn(SignInPayload),
    SignUp(SignUpPayload),
}

impl SubmitRequest {
    pub fn mode(&self) -> FlowMode {
        match self {
            SubmitRequest::SignIn(_) => FlowMode::SignIn,
            SubmitRequest::SignUp(_) => FlowMode::SignUp,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            SubmitRequest::SignIn(payload) => &payload.email,
            SubmitRequest::SignUp(payload) => &payload.email,
        }
    }
}
