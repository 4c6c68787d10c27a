use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_newtype!(UserId);
id_newtype!(SessionId);

pub const HOME_ROUTE: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown flow mode '{0}' (expected 'sign-in' or 'sign-up')")]
    FlowMode(String),
    #[error("unknown field name '{0}'")]
    FieldName(String),
}

/// Which onboarding flow governs the form: returning users sign in, new users
/// sign up and continue to account linking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlowMode {
    SignIn,
    SignUp,
}

impl FlowMode {
    pub fn as_str(self) -> &'static str {
        match self {
            FlowMode::SignIn => "sign-in",
            FlowMode::SignUp => "sign-up",
        }
    }

    pub fn route(self) -> &'static str {
        match self {
            FlowMode::SignIn => "/sign-in",
            FlowMode::SignUp => "/sign-up",
        }
    }

    pub fn alternate(self) -> Self {
        match self {
            FlowMode::SignIn => FlowMode::SignUp,
            FlowMode::SignUp => FlowMode::SignIn,
        }
    }
}

impl fmt::Display for FlowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlowMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "sign-in" => Ok(FlowMode::SignIn),
            "sign-up" => Ok(FlowMode::SignUp),
            other => Err(ParseError::FlowMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    FirstName,
    LastName,
    Address1,
    City,
    State,
    PostalCode,
    DateOfBirth,
    Ssn,
    Email,
    Password,
}

impl FieldName {
    pub const ALL: [FieldName; 10] = [
        FieldName::FirstName,
        FieldName::LastName,
        FieldName::Address1,
        FieldName::City,
        FieldName::State,
        FieldName::PostalCode,
        FieldName::DateOfBirth,
        FieldName::Ssn,
        FieldName::Email,
        FieldName::Password,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::FirstName => "firstName",
            FieldName::LastName => "lastName",
            FieldName::Address1 => "address1",
            FieldName::City => "city",
            FieldName::State => "state",
            FieldName::PostalCode => "postalCode",
            FieldName::DateOfBirth => "dateOfBirth",
            FieldName::Ssn => "ssn",
            FieldName::Email => "email",
            FieldName::Password => "password",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        FieldName::ALL
            .into_iter()
            .find(|name| name.as_str() == key)
            .ok_or_else(|| ParseError::FieldName(key.to_string()))
    }
}

/// Opaque handle for a newly created user. Only `id` is guaranteed; anything
/// else the provider returns is carried through for the linking collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Identity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: UserId(id.into()),
            email: None,
            name: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub session_id: SessionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}
