//! Types shared between the onboarding core, its collaborators and the CLI.

pub mod domain;
pub mod error;
pub mod protocol;
