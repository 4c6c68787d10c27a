use super::*;
use crate::error::ValidationError;

fn filled_sign_up() -> FormSession {
    let mut session = FormSession::new(FlowMode::SignUp);
    for (name, value) in [
        (FieldName::FirstName, "Ada"),
        (FieldName::LastName, "Lovelace"),
        (FieldName::Address1, "1 Main St"),
        (FieldName::City, "Queens"),
        (FieldName::State, "NY"),
        (FieldName::PostalCode, "11101"),
        (FieldName::DateOfBirth, "1990-12-10"),
        (FieldName::Ssn, "1234"),
        (FieldName::Email, "ada@example.com"),
        (FieldName::Password, "analytical"),
    ] {
        session.set_field(name, value);
    }
    session
}

#[test]
fn new_session_starts_editing_with_no_values() {
    let session = FormSession::new(FlowMode::SignIn);
    assert_eq!(session.state(), &SessionState::Editing);
    assert_eq!(session.value(FieldName::Email), None);
    assert!(session.result(FieldName::Email).is_none());
    assert!(!session.can_submit());
}

#[test]
fn valid_sign_in_can_submit_and_builds_credentials_payload() {
    let mut session = FormSession::new(FlowMode::SignIn);
    session.set_field(FieldName::Email, "a@b.com");
    session.set_field(FieldName::Password, "12345678");
    assert!(session.can_submit());

    let request = session.submit().expect("submit");
    assert_eq!(
        request,
        SubmitRequest::SignIn(SignInPayload {
            email: "a@b.com".into(),
            password: "12345678".into(),
        })
    );
    assert_eq!(session.state(), &SessionState::Submitting);
}

#[test]
fn invalid_sign_in_marks_both_fields() {
    let mut session = FormSession::new(FlowMode::SignIn);
    let email = session.set_field(FieldName::Email, "not-an-email");
    let password = session.set_field(FieldName::Password, "x");
    assert_eq!(
        email,
        Some(ValidationResult::Invalid(ValidationError::InvalidEmail))
    );
    assert_eq!(
        password,
        Some(ValidationResult::Invalid(
            ValidationError::PasswordTooShort { min: 8 }
        ))
    );
    assert!(!session.can_submit());
}

#[test]
fn set_field_only_revalidates_the_edited_field() {
    let mut session = FormSession::new(FlowMode::SignUp);
    session.set_field(FieldName::Email, "a@b.com");
    assert!(session.result(FieldName::Email).is_some());
    assert!(session.result(FieldName::FirstName).is_none());
    assert!(session.result(FieldName::Ssn).is_none());
}

#[test]
fn set_field_is_idempotent() {
    let mut session = FormSession::new(FlowMode::SignUp);
    let first = session.set_field(FieldName::Ssn, "12");
    let second = session.set_field(FieldName::Ssn, "12");
    assert_eq!(first, second);
    assert_eq!(session.value(FieldName::Ssn), Some("12"));
}

#[test]
fn clearing_a_field_makes_it_absent() {
    let mut session = FormSession::new(FlowMode::SignIn);
    session.set_field(FieldName::Email, "a@b.com");
    let result = session.set_field(FieldName::Email, "");
    assert_eq!(session.value(FieldName::Email), None);
    assert_eq!(
        result,
        Some(ValidationResult::Invalid(ValidationError::Required))
    );
}

#[test]
fn sign_up_missing_ssn_blocks_until_valid_code() {
    let mut session = filled_sign_up();
    session.set_field(FieldName::Ssn, "");
    assert!(!session.can_submit());

    session.set_field(FieldName::Ssn, "12345");
    assert!(!session.can_submit());

    session.set_field(FieldName::Ssn, "1234");
    assert!(session.can_submit());
}

#[test]
fn sign_up_payload_contains_exactly_the_profile() {
    let mut session = filled_sign_up();
    let request = session.submit().expect("submit");
    let SubmitRequest::SignUp(payload) = request else {
        panic!("expected sign-up payload");
    };
    assert_eq!(
        payload,
        SignUpPayload {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            address1: "1 Main St".into(),
            city: "Queens".into(),
            state: "NY".into(),
            postal_code: "11101".into(),
            date_of_birth: "1990-12-10".into(),
            ssn: "1234".into(),
            email: "ada@example.com".into(),
            password: "analytical".into(),
        }
    );

    let wire = serde_json::to_value(&payload).expect("serialize");
    let object = wire.as_object().expect("object");
    assert_eq!(object.len(), 10);
    assert!(object.values().all(|v| v.as_str().is_some_and(|s| !s.is_empty())));
}

#[test]
fn profile_fields_are_ignored_in_sign_in_mode() {
    let mut session = FormSession::new(FlowMode::SignIn);
    assert_eq!(session.set_field(FieldName::Ssn, "oops"), None);
    assert_eq!(session.value(FieldName::Ssn), None);

    session.set_field(FieldName::Email, "a@b.com");
    session.set_field(FieldName::Password, "12345678");
    assert!(session.can_submit());
}

#[test]
fn submit_with_invalid_fields_is_a_precondition_error() {
    let mut session = FormSession::new(FlowMode::SignIn);
    session.set_field(FieldName::Email, "a@b.com");

    let err = session.submit().expect_err("must fail");
    assert_eq!(err, PreconditionError::InvalidFields(vec![FieldName::Password]));
    assert_eq!(session.state(), &SessionState::Editing);
    assert_eq!(
        session.result(FieldName::Password),
        Some(&ValidationResult::Invalid(ValidationError::Required))
    );
}

#[test]
fn submitting_session_locks_edits_and_submit() {
    let mut session = FormSession::new(FlowMode::SignIn);
    session.set_field(FieldName::Email, "a@b.com");
    session.set_field(FieldName::Password, "12345678");
    session.submit().expect("submit");

    assert!(!session.can_submit());
    assert_eq!(session.set_field(FieldName::Email, "c@d.com"), None);
    assert_eq!(session.value(FieldName::Email), Some("a@b.com"));
    assert_eq!(
        session.submit(),
        Err(PreconditionError::NotEditable {
            state: "submitting"
        })
    );
}

#[test]
fn failed_session_is_editable_and_keeps_values() {
    let mut session = FormSession::new(FlowMode::SignIn);
    session.set_field(FieldName::Email, "a@b.com");
    session.set_field(FieldName::Password, "12345678");
    session.submit().expect("submit");
    session.finish_failed(AuthError::InvalidCredentials("bad credentials".into()));

    assert!(session.state().is_editable());
    assert_eq!(session.value(FieldName::Password), Some("12345678"));
    assert!(session.can_submit());
    assert!(session.set_field(FieldName::Password, "87654321").is_some());
}

#[test]
fn linked_session_rejects_edits() {
    let mut session = filled_sign_up();
    session.submit().expect("submit");
    session.finish_linked(Identity::new("u1"));

    assert_eq!(session.set_field(FieldName::City, "Boston"), None);
    assert!(!session.can_submit());
    assert_eq!(
        session.submit(),
        Err(PreconditionError::NotEditable {
            state: "linked_pending"
        })
    );
}
