//! Form session: field values, inline validation and submission status.

use std::collections::BTreeMap;

use shared::{
    domain::{FieldName, FlowMode, Identity},
    protocol::{SignInPayload, SignUpPayload, SubmitRequest},
};
use tracing::debug;

use crate::{
    error::{AuthError, PreconditionError},
    schema::{self, FieldSpec},
    validator::{self, ValidationPolicy, ValidationResult},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Editing,
    Submitting,
    /// Editable like `Editing`, with the last provider error kept for display.
    Failed(AuthError),
    LinkedPending(Identity),
}

impl SessionState {
    pub fn is_editable(&self) -> bool {
        matches!(self, SessionState::Editing | SessionState::Failed(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Editing => "editing",
            SessionState::Submitting => "submitting",
            SessionState::Failed(_) => "failed",
            SessionState::LinkedPending(_) => "linked_pending",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormSession {
    mode: FlowMode,
    policy: ValidationPolicy,
    values: BTreeMap<FieldName, String>,
    results: BTreeMap<FieldName, ValidationResult>,
    state: SessionState,
}

impl FormSession {
    pub fn new(mode: FlowMode) -> Self {
        Self::with_policy(mode, ValidationPolicy::default())
    }

    pub fn with_policy(mode: FlowMode, policy: ValidationPolicy) -> Self {
        Self {
            mode,
            policy,
            values: BTreeMap::new(),
            results: BTreeMap::new(),
            state: SessionState::Editing,
        }
    }

    pub fn mode(&self) -> FlowMode {
        self.mode
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn schema(&self) -> &'static [FieldSpec] {
        schema::resolve(self.mode)
    }

    pub fn value(&self, name: FieldName) -> Option<&str> {
        self.values.get(&name).map(String::as_str)
    }

    /// Inline result for `name`; `None` until the field has been edited or a
    /// full validation pass ran.
    pub fn result(&self, name: FieldName) -> Option<&ValidationResult> {
        self.results.get(&name)
    }

    /// Updates one field and re-validates only that field. Returns `None` when
    /// the edit was ignored (locked session or field outside the active schema).
    pub fn set_field(
        &mut self,
        name: FieldName,
        value: impl Into<String>,
    ) -> Option<ValidationResult> {
        if !self.state.is_editable() {
            debug!(
                field = name.as_str(),
                state = self.state.label(),
                "ignoring edit on locked session"
            );
            return None;
        }
        let Some(spec) = schema::field_spec(self.mode, name) else {
            debug!(
                field = name.as_str(),
                mode = self.mode.as_str(),
                "ignoring edit for field outside active schema"
            );
            return None;
        };

        let value = value.into();
        if value.is_empty() {
            self.values.remove(&name);
        } else {
            self.values.insert(name, value);
        }

        let result = validator::validate(spec, self.value(name), &self.policy);
        self.results.insert(name, result.clone());
        Some(result)
    }

    /// Validates every field of the active schema, records the inline results
    /// and returns the names of the invalid ones in display order.
    pub fn validate_all(&mut self) -> Vec<FieldName> {
        let mut invalid = Vec::new();
        for spec in self.schema() {
            let result = validator::validate(spec, self.value(spec.name), &self.policy);
            if !result.is_valid() {
                invalid.push(spec.name);
            }
            self.results.insert(spec.name, result);
        }
        invalid
    }

    pub fn is_valid(&self) -> bool {
        self.schema()
            .iter()
            .all(|spec| validator::validate(spec, self.value(spec.name), &self.policy).is_valid())
    }

    pub fn can_submit(&self) -> bool {
        self.state.is_editable() && self.is_valid()
    }

    /// Builds the provider request for the active mode and locks the session.
    pub fn submit(&mut self) -> Result<SubmitRequest, PreconditionError> {
        if !self.state.is_editable() {
            return Err(PreconditionError::NotEditable {
                state: self.state.label(),
            });
        }
        let invalid = self.validate_all();
        if !invalid.is_empty() {
            return Err(PreconditionError::InvalidFields(invalid));
        }

        let request = match self.mode {
            FlowMode::SignIn => SubmitRequest::SignIn(SignInPayload {
                email: self.required_value(FieldName::Email)?,
                password: self.required_value(FieldName::Password)?,
            }),
            FlowMode::SignUp => SubmitRequest::SignUp(SignUpPayload {
                first_name: self.required_value(FieldName::FirstName)?,
                last_name: self.required_value(FieldName::LastName)?,
                address1: self.required_value(FieldName::Address1)?,
                city: self.required_value(FieldName::City)?,
                state: self.required_value(FieldName::State)?,
                postal_code: self.required_value(FieldName::PostalCode)?,
                date_of_birth: self.required_value(FieldName::DateOfBirth)?,
                ssn: self.required_value(FieldName::Ssn)?,
                email: self.required_value(FieldName::Email)?,
                password: self.required_value(FieldName::Password)?,
            }),
        };

        self.state = SessionState::Submitting;
        Ok(request)
    }

    fn required_value(&self, name: FieldName) -> Result<String, PreconditionError> {
        self.values
            .get(&name)
            .cloned()
            .ok_or_else(|| PreconditionError::InvalidFields(vec![name]))
    }

    pub(crate) fn is_submitting(&self) -> bool {
        self.state == SessionState::Submitting
    }

    pub(crate) fn finish_failed(&mut self, err: AuthError) {
        self.state = SessionState::Failed(err);
    }

    pub(crate) fn finish_linked(&mut self, identity: Identity) {
        self.state = SessionState::LinkedPending(identity);
    }

    pub(crate) fn finish_editing(&mut self) {
        self.state = SessionState::Editing;
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
