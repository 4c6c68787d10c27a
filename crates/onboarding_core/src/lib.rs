use async_trait::async_trait;
use shared::{
    domain::{AuthSession, Identity, HOME_ROUTE},
    protocol::{SignInPayload, SignUpPayload},
};
use tracing::info;

pub mod error;
pub mod events;
pub mod form;
mod handle;
pub mod http_provider;
pub mod linking;
pub mod orchestrator;
pub mod schema;
pub mod validator;
pub mod view;

pub use error::{AuthError, PreconditionError, ValidationError};
pub use events::OnboardingEvent;
pub use form::{FormSession, SessionState};
pub use handle::OnboardingHandle;
pub use http_provider::HttpIdentityProvider;
pub use linking::{ChannelLinkHandoff, LinkingHandoff, LoggingLinkHandoff};
pub use orchestrator::{AuthOrchestrator, AuthPhase, Completion, SubmitOutcome, SubmitTicket};
pub use schema::{FieldKind, FieldSpec};
pub use validator::{ValidationPolicy, ValidationResult};
pub use view::{FormView, ScreenMode};

/// Backend that creates accounts and signs users in.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(&self, profile: &SignUpPayload) -> Result<Identity, AuthError>;
    async fn sign_in(&self, credentials: &SignInPayload) -> Result<AuthSession, AuthError>;
}

/// Router collaborator; told to leave the form after a successful sign-in.
pub trait Navigator: Send + Sync {
    fn go_home(&self);
}

pub struct MissingIdentityProvider;

#[async_trait]
impl IdentityProvider for MissingIdentityProvider {
    async fn sign_up(&self, profile: &SignUpPayload) -> Result<Identity, AuthError> {
        Err(AuthError::Unavailable(format!(
            "no identity provider configured to sign up {}",
            profile.email
        )))
    }

    async fn sign_in(&self, credentials: &SignInPayload) -> Result<AuthSession, AuthError> {
        Err(AuthError::Unavailable(format!(
            "no identity provider configured to sign in {}",
            credentials.email
        )))
    }
}

pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn go_home(&self) {
        info!(route = HOME_ROUTE, "navigating away from onboarding form");
    }
}

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
