use std::sync::Arc;

use shared::domain::{FieldName, FlowMode};
use tokio::sync::{broadcast, Mutex};
use tracing::debug;

use crate::{
    error::PreconditionError,
    events::OnboardingEvent,
    orchestrator::{AuthOrchestrator, AuthPhase, Completion, SubmitOutcome},
    validator::ValidationResult,
    view::FormView,
};

const EVENT_CAPACITY: usize = 64;

/// Shared, cloneable access to one onboarding session. The lock is released
/// while the identity provider is awaited, so edits and renders keep flowing
/// (and are ignored by the locked session) during a submit.
#[derive(Clone)]
pub struct OnboardingHandle {
    inner: Arc<Mutex<AuthOrchestrator>>,
    events: broadcast::Sender<OnboardingEvent>,
}

impl OnboardingHandle {
    pub fn new(orchestrator: AuthOrchestrator) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Mutex::new(orchestrator)),
            events,
        }
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<OnboardingEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: OnboardingEvent) {
        if self.events.send(event).is_err() {
            debug!("no onboarding event subscribers");
        }
    }

    pub async fn set_field(
        &self,
        name: FieldName,
        value: impl Into<String>,
    ) -> Option<ValidationResult> {
        let result = self.inner.lock().await.set_field(name, value)?;
        self.emit(OnboardingEvent::FieldValidated {
            field: name,
            result: result.clone(),
        });
        Some(result)
    }

    pub async fn can_submit(&self) -> bool {
        self.inner.lock().await.can_submit()
    }

    pub async fn phase(&self) -> AuthPhase {
        self.inner.lock().await.phase()
    }

    pub async fn view(&self) -> FormView {
        self.inner.lock().await.view()
    }

    pub async fn submit(&self) -> Result<Completion, PreconditionError> {
        let (ticket, provider) = {
            let mut orchestrator = self.inner.lock().await;
            let ticket = orchestrator.begin_submit()?;
            (ticket, orchestrator.provider())
        };
        self.emit(OnboardingEvent::PhaseChanged(AuthPhase::Submitting));

        let outcome = SubmitOutcome::dispatch(provider.as_ref(), ticket.request()).await;

        let completion = self.inner.lock().await.complete(ticket, outcome);
        match &completion {
            Completion::Applied(phase) => self.emit(OnboardingEvent::PhaseChanged(phase.clone())),
            Completion::Discarded => self.emit(OnboardingEvent::ResultDiscarded),
        }
        Ok(completion)
    }

    pub async fn remount(&self, mode: FlowMode) {
        self.inner.lock().await.remount(mode);
        self.emit(OnboardingEvent::Remounted(mode));
    }

    pub async fn dispose(&self) {
        self.inner.lock().await.dispose();
        self.emit(OnboardingEvent::Disposed);
    }
}

#[cfg(test)]
#[path = "tests/handle_tests.rs"]
mod tests;
