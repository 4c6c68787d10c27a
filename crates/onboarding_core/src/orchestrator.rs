//! Submission state machine: form session -> identity provider -> outcome.
//!
//! The provider call is the only suspension point. Submission is split into
//! [`AuthOrchestrator::begin_submit`], the provider call and
//! [`AuthOrchestrator::complete`] so callers can release their lock while the
//! request is in flight; a ticket that no longer matches the session (after
//! `remount` or `dispose`) is discarded on completion.

use std::sync::Arc;

use shared::{
    domain::{AuthSession, FieldName, FlowMode, Identity},
    protocol::SubmitRequest,
};
use tracing::{debug, info, warn};

use crate::{
    error::{AuthError, PreconditionError},
    form::{FormSession, SessionState},
    linking::LinkingHandoff,
    validator::{ValidationPolicy, ValidationResult},
    view::FormView,
    IdentityProvider, Navigator,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthPhase {
    Idle,
    Submitting,
    Failed(AuthError),
    Authenticated(Identity),
    Redirected,
}

impl AuthPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AuthPhase::Authenticated(_) | AuthPhase::Redirected)
    }
}

#[derive(Debug)]
pub struct SubmitTicket {
    epoch: u64,
    request: SubmitRequest,
}

impl SubmitTicket {
    pub fn request(&self) -> &SubmitRequest {
        &self.request
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    SignedUp(Identity),
    SignedIn(AuthSession),
    Failed(AuthError),
}

impl SubmitOutcome {
    /// Calls the provider operation selected by the request's flow mode.
    pub async fn dispatch(provider: &dyn IdentityProvider, request: &SubmitRequest) -> Self {
        match request {
            SubmitRequest::SignUp(profile) => match provider.sign_up(profile).await {
                Ok(identity) => SubmitOutcome::SignedUp(identity),
                Err(err) => SubmitOutcome::Failed(err),
            },
            SubmitRequest::SignIn(credentials) => match provider.sign_in(credentials).await {
                Ok(session) => SubmitOutcome::SignedIn(session),
                Err(err) => SubmitOutcome::Failed(err),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Applied(AuthPhase),
    /// The session was disposed or remounted while the request was in flight.
    Discarded,
}

pub struct AuthOrchestrator {
    session: FormSession,
    provider: Arc<dyn IdentityProvider>,
    handoff: Arc<dyn LinkingHandoff>,
    navigator: Arc<dyn Navigator>,
    epoch: u64,
    redirected: bool,
    disposed: bool,
}

impl AuthOrchestrator {
    pub fn new(
        mode: FlowMode,
        provider: Arc<dyn IdentityProvider>,
        handoff: Arc<dyn LinkingHandoff>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            session: FormSession::new(mode),
            provider,
            handoff,
            navigator,
            epoch: 0,
            redirected: false,
            disposed: false,
        }
    }

    /// Replaces the validation thresholds. Resets the form.
    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.session = FormSession::with_policy(self.session.mode(), policy);
        self
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    pub fn mode(&self) -> FlowMode {
        self.session.mode()
    }

    pub fn provider(&self) -> Arc<dyn IdentityProvider> {
        Arc::clone(&self.provider)
    }

    pub fn phase(&self) -> AuthPhase {
        if self.redirected {
            return AuthPhase::Redirected;
        }
        match self.session.state() {
            SessionState::Editing => AuthPhase::Idle,
            SessionState::Submitting => AuthPhase::Submitting,
            SessionState::Failed(err) => AuthPhase::Failed(err.clone()),
            SessionState::LinkedPending(identity) => AuthPhase::Authenticated(identity.clone()),
        }
    }

    pub fn set_field(
        &mut self,
        name: FieldName,
        value: impl Into<String>,
    ) -> Option<ValidationResult> {
        if self.disposed || self.redirected {
            return None;
        }
        self.session.set_field(name, value)
    }

    pub fn can_submit(&self) -> bool {
        !self.disposed && !self.redirected && self.session.can_submit()
    }

    pub fn begin_submit(&mut self) -> Result<SubmitTicket, PreconditionError> {
        if self.disposed {
            return Err(PreconditionError::Disposed);
        }
        if self.phase().is_terminal() {
            return Err(PreconditionError::Finished);
        }

        let request = self.session.submit()?;
        info!(
            mode = request.mode().as_str(),
            email = request.email(),
            epoch = self.epoch,
            "submitting onboarding request"
        );
        Ok(SubmitTicket {
            epoch: self.epoch,
            request,
        })
    }

    /// Applies a provider result to the session this ticket was issued for.
    pub fn complete(&mut self, ticket: SubmitTicket, outcome: SubmitOutcome) -> Completion {
        if self.disposed || ticket.epoch != self.epoch || !self.session.is_submitting() {
            debug!(
                ticket_epoch = ticket.epoch,
                epoch = self.epoch,
                disposed = self.disposed,
                "discarding late identity provider result"
            );
            return Completion::Discarded;
        }

        let mode = ticket.request.mode();
        match (mode, outcome) {
            (FlowMode::SignUp, SubmitOutcome::SignedUp(identity)) => {
                info!(user_id = %identity.id, "sign-up succeeded; handing off to account linking");
                self.session.finish_linked(identity.clone());
                self.handoff.on_authenticated(&identity);
            }
            (FlowMode::SignIn, SubmitOutcome::SignedIn(session)) => {
                info!(session_id = %session.session_id, "sign-in succeeded; leaving form");
                self.session.finish_editing();
                self.redirected = true;
                self.navigator.go_home();
            }
            (_, SubmitOutcome::Failed(err)) => {
                warn!(mode = mode.as_str(), error = %err, "identity provider rejected submission");
                self.session.finish_failed(err);
            }
            (mode, other) => {
                let err = AuthError::Unexpected(format!(
                    "identity provider answered {mode} request with {other:?}"
                ));
                warn!(error = %err, "mismatched identity provider response");
                self.session.finish_failed(err);
            }
        }
        Completion::Applied(self.phase())
    }

    pub async fn submit(&mut self) -> Result<AuthPhase, PreconditionError> {
        let ticket = self.begin_submit()?;
        let provider = self.provider();
        let outcome = SubmitOutcome::dispatch(provider.as_ref(), ticket.request()).await;
        match self.complete(ticket, outcome) {
            Completion::Applied(phase) => Ok(phase),
            Completion::Discarded => Ok(self.phase()),
        }
    }

    /// Mounts a fresh form for `mode`. Any in-flight result is discarded.
    pub fn remount(&mut self, mode: FlowMode) {
        let policy = *self.session.policy();
        self.session = FormSession::with_policy(mode, policy);
        self.epoch += 1;
        self.redirected = false;
        self.disposed = false;
        debug!(mode = mode.as_str(), epoch = self.epoch, "remounted onboarding form");
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
        self.epoch += 1;
        debug!(epoch = self.epoch, "disposed onboarding form");
    }

    pub fn view(&self) -> FormView {
        FormView::build(&self.session, &self.phase())
    }
}

#[cfg(test)]
#[path = "tests/orchestrator_tests.rs"]
mod tests;
