//! Test doubles for the identity provider, linking handoff and navigator.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use shared::{
    domain::{AuthSession, FieldName, FlowMode, Identity, SessionId},
    protocol::{SignInPayload, SignUpPayload},
};
use tokio::sync::Notify;

use crate::{
    error::AuthError, linking::LinkingHandoff, orchestrator::AuthOrchestrator, IdentityProvider,
    Navigator,
};

#[derive(Default)]
pub struct Calls {
    pub sign_up: Vec<SignUpPayload>,
    pub sign_in: Vec<SignInPayload>,
}

struct Gate {
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

pub struct ScriptedProvider {
    sign_up_result: Result<Identity, AuthError>,
    sign_in_result: Result<AuthSession, AuthError>,
    calls: Mutex<Calls>,
    gate: Option<Gate>,
}

impl ScriptedProvider {
    pub fn ok() -> Self {
        Self {
            sign_up_result: Ok(Identity::new("u1")),
            sign_in_result: Ok(AuthSession {
                session_id: SessionId::from("s1"),
                user_id: None,
            }),
            calls: Mutex::new(Calls::default()),
            gate: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            sign_up_result: Err(AuthError::from_message(message)),
            sign_in_result: Err(AuthError::from_message(message)),
            calls: Mutex::new(Calls::default()),
            gate: None,
        }
    }

    /// Holds every call until `release` is notified; `entered` fires once the
    /// call has been recorded.
    pub fn gated(mut self) -> (Self, Arc<Notify>, Arc<Notify>) {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        self.gate = Some(Gate {
            entered: Arc::clone(&entered),
            release: Arc::clone(&release),
        });
        (self, entered, release)
    }

    pub fn sign_in_calls(&self) -> Vec<SignInPayload> {
        self.calls.lock().expect("calls").sign_in.clone()
    }

    pub fn sign_up_calls(&self) -> Vec<SignUpPayload> {
        self.calls.lock().expect("calls").sign_up.clone()
    }

    async fn wait_for_release(&self) {
        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
    }
}

#[async_trait]
impl IdentityProvider for ScriptedProvider {
    async fn sign_up(&self, profile: &SignUpPayload) -> Result<Identity, AuthError> {
        self.calls
            .lock()
            .expect("calls")
            .sign_up
            .push(profile.clone());
        self.wait_for_release().await;
        self.sign_up_result.clone()
    }

    async fn sign_in(&self, credentials: &SignInPayload) -> Result<AuthSession, AuthError> {
        self.calls
            .lock()
            .expect("calls")
            .sign_in
            .push(credentials.clone());
        self.wait_for_release().await;
        self.sign_in_result.clone()
    }
}

#[derive(Default)]
pub struct RecordingHandoff {
    identities: Mutex<Vec<Identity>>,
}

impl RecordingHandoff {
    pub fn identities(&self) -> Vec<Identity> {
        self.identities.lock().expect("identities").clone()
    }
}

impl LinkingHandoff for RecordingHandoff {
    fn on_authenticated(&self, identity: &Identity) {
        self.identities
            .lock()
            .expect("identities")
            .push(identity.clone());
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    home_calls: AtomicUsize,
}

impl RecordingNavigator {
    pub fn home_calls(&self) -> usize {
        self.home_calls.load(Ordering::SeqCst)
    }
}

impl Navigator for RecordingNavigator {
    fn go_home(&self) {
        self.home_calls.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct Harness {
    pub orchestrator: AuthOrchestrator,
    pub provider: Arc<ScriptedProvider>,
    pub handoff: Arc<RecordingHandoff>,
    pub navigator: Arc<RecordingNavigator>,
}

pub fn harness(mode: FlowMode, provider: ScriptedProvider) -> Harness {
    let provider = Arc::new(provider);
    let handoff = Arc::new(RecordingHandoff::default());
    let navigator = Arc::new(RecordingNavigator::default());
    let orchestrator = AuthOrchestrator::new(
        mode,
        provider.clone(),
        handoff.clone(),
        navigator.clone(),
    );
    Harness {
        orchestrator,
        provider,
        handoff,
        navigator,
    }
}

pub const SIGN_UP_VALUES: [(FieldName, &str); 10] = [
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
];

pub fn fill_sign_up(orchestrator: &mut AuthOrchestrator) {
    for (name, value) in SIGN_UP_VALUES {
        orchestrator.set_field(name, value);
    }
}

pub fn fill_sign_in(orchestrator: &mut AuthOrchestrator, email: &str, password: &str) {
    orchestrator.set_field(FieldName::Email, email);
    orchestrator.set_field(FieldName::Password, password);
}
