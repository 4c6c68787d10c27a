//! Presentation-free view model of the onboarding form.

use shared::domain::{FieldName, FlowMode, Identity};

use crate::{
    form::FormSession,
    orchestrator::AuthPhase,
    schema::FieldKind,
};

const MASK: char = '•';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenMode {
    CollectCredentials,
    Processing,
    LinkAccount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub name: FieldName,
    pub label: &'static str,
    pub placeholder: &'static str,
    /// Current input; passwords are masked.
    pub value: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterLink {
    pub prompt: &'static str,
    pub label: &'static str,
    pub route: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub screen: ScreenMode,
    pub heading: &'static str,
    pub subheading: &'static str,
    pub submit_label: &'static str,
    pub submit_enabled: bool,
    pub busy: bool,
    pub error_banner: Option<String>,
    pub fields: Vec<FieldView>,
    pub footer: Option<FooterLink>,
    /// Set once sign-up succeeded; consumed by the account-linking widget.
    pub identity: Option<Identity>,
}

impl FormView {
    pub fn build(session: &FormSession, phase: &AuthPhase) -> Self {
        let mode = session.mode();
        if let AuthPhase::Authenticated(identity) = phase {
            return Self {
                screen: ScreenMode::LinkAccount,
                heading: "Link Account",
                subheading: "Link your account to get started",
                submit_label: submit_label(mode),
                submit_enabled: false,
                busy: false,
                error_banner: None,
                fields: Vec::new(),
                footer: None,
                identity: Some(identity.clone()),
            };
        }

        let busy = matches!(phase, AuthPhase::Submitting);
        let fields = session
            .schema()
            .iter()
            .map(|spec| FieldView {
                name: spec.name,
                label: spec.label,
                placeholder: spec.placeholder,
                value: session.value(spec.name).map(|value| match spec.kind {
                    FieldKind::Password => MASK.to_string().repeat(value.chars().count()),
                    _ => value.to_string(),
                }),
                error: session
                    .result(spec.name)
                    .and_then(|result| result.error())
                    .map(ToString::to_string),
            })
            .collect();

        Self {
            screen: if busy {
                ScreenMode::Processing
            } else {
                ScreenMode::CollectCredentials
            },
            heading: heading(mode),
            subheading: "Please enter your details",
            submit_label: if busy {
                "Processing..."
            } else {
                submit_label(mode)
            },
            submit_enabled: !busy
                && !matches!(phase, AuthPhase::Redirected)
                && session.can_submit(),
            busy,
            error_banner: match phase {
                AuthPhase::Failed(err) => Some(err.display_message()),
                _ => None,
            },
            fields,
            footer: Some(footer(mode)),
            identity: None,
        }
    }
}

fn heading(mode: FlowMode) -> &'static str {
    match mode {
        FlowMode::SignIn => "Sign In",
        FlowMode::SignUp => "Sign Up",
    }
}

fn submit_label(mode: FlowMode) -> &'static str {
    heading(mode)
}

fn footer(mode: FlowMode) -> FooterLink {
    match mode {
        FlowMode::SignIn => FooterLink {
            prompt: "Don't have an account?",
            label: "Sign up",
            route: mode.alternate().route(),
        },
        FlowMode::SignUp => FooterLink {
            prompt: "Already have an account?",
            label: "Sign in",
            route: mode.alternate().route(),
        },
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
