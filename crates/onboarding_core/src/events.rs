//! Events broadcast to whatever renders the onboarding form.

use shared::domain::{FieldName, FlowMode};

use crate::{orchestrator::AuthPhase, validator::ValidationResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnboardingEvent {
    FieldValidated {
        field: FieldName,
        result: ValidationResult,
    },
    PhaseChanged(AuthPhase),
    Remounted(FlowMode),
    /// The form was torn down; later provider results are dropped.
    Disposed,
    ResultDiscarded,
}
