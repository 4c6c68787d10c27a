//! Field sets per flow mode.

use shared::domain::{FieldName, FlowMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Date,
    ShortCode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: FieldName,
    pub kind: FieldKind,
    pub required: bool,
    pub label: &'static str,
    pub placeholder: &'static str,
}

impl FieldSpec {
    const fn required(
        name: FieldName,
        kind: FieldKind,
        label: &'static str,
        placeholder: &'static str,
    ) -> Self {
        Self {
            name,
            kind,
            required: true,
            label,
            placeholder,
        }
    }
}

const EMAIL: FieldSpec = FieldSpec::required(
    FieldName::Email,
    FieldKind::Email,
    "Email",
    "Enter your email",
);
const PASSWORD: FieldSpec = FieldSpec::required(
    FieldName::Password,
    FieldKind::Password,
    "Password",
    "Enter your password",
);

static SIGN_IN_FIELDS: [FieldSpec; 2] = [EMAIL, PASSWORD];

static SIGN_UP_FIELDS: [FieldSpec; 10] = [
    FieldSpec::required(
        FieldName::FirstName,
        FieldKind::Text,
        "First Name",
        "Enter your first name",
    ),
    FieldSpec::required(
        FieldName::LastName,
        FieldKind::Text,
        "Last Name",
        "Enter your last name",
    ),
    FieldSpec::required(
        FieldName::Address1,
        FieldKind::Text,
        "Address",
        "Enter your specific address",
    ),
    FieldSpec::required(FieldName::City, FieldKind::Text, "City", "Enter your city"),
    FieldSpec::required(FieldName::State, FieldKind::Text, "State", "Example: NY"),
    FieldSpec::required(
        FieldName::PostalCode,
        FieldKind::Text,
        "Postal Code",
        "Example: 11101",
    ),
    FieldSpec::required(
        FieldName::DateOfBirth,
        FieldKind::Date,
        "Date of Birth",
        "YYYY-MM-DD",
    ),
    FieldSpec::required(FieldName::Ssn, FieldKind::ShortCode, "SSN", "Example: 1234"),
    EMAIL,
    PASSWORD,
];

/// Ordered field set for `mode`. Order is the display order and is stable.
pub fn resolve(mode: FlowMode) -> &'static [FieldSpec] {
    match mode {
        FlowMode::SignIn => &SIGN_IN_FIELDS,
        FlowMode::SignUp => &SIGN_UP_FIELDS,
    }
}

pub fn field_spec(mode: FlowMode, name: FieldName) -> Option<&'static FieldSpec> {
    resolve(mode).iter().find(|spec| spec.name == name)
}

#[cfg(test)]
#[path = "tests/schema_tests.rs"]
mod tests;
