use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Result};
use clap::Parser;
use onboarding_core::{
    AuthOrchestrator, AuthPhase, ChannelLinkHandoff, Completion, FormView,
    HttpIdentityProvider, IdentityProvider, LinkingHandoff, LoggingLinkHandoff, LoggingNavigator,
    MissingIdentityProvider, OnboardingHandle,
};
use shared::domain::{FieldName, FlowMode, HOME_ROUTE};
use tracing_subscriber::EnvFilter;

mod config;

/// Runs one sign-in or sign-up attempt against an identity provider.
#[derive(Parser, Debug)]
struct Args {
    /// `sign-in` or `sign-up`.
    #[arg(long)]
    mode: FlowMode,
    /// Base URL of the identity provider; overrides the config file.
    #[arg(long)]
    identity_url: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
    /// Form input as `name=value`, e.g. `--field email=a@b.com`.
    #[arg(long = "field", value_parser = parse_field)]
    fields: Vec<(FieldName, String)>,
    /// Validate and render the form without submitting.
    #[arg(long)]
    dry_run: bool,
    /// Only log the account-linking handoff instead of printing the identity.
    #[arg(long)]
    log_handoff: bool,
}

fn parse_field(raw: &str) -> Result<(FieldName, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))?;
    let name = name.parse::<FieldName>().map_err(|err| err.to_string())?;
    Ok((name, value.to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();
    let settings = config::load_settings(args.config.as_deref())?;

    let provider: Arc<dyn IdentityProvider> =
        match args.identity_url.or(settings.identity_url) {
            Some(url) => Arc::new(HttpIdentityProvider::new(&url)?),
            None => {
                tracing::warn!("no identity provider url configured; submissions will fail");
                Arc::new(MissingIdentityProvider)
            }
        };
    let (handoff, mut linked) = if args.log_handoff {
        let handoff: Arc<dyn LinkingHandoff> = Arc::new(LoggingLinkHandoff);
        (handoff, None)
    } else {
        let (handoff, linked) = ChannelLinkHandoff::new();
        let handoff: Arc<dyn LinkingHandoff> = Arc::new(handoff);
        (handoff, Some(linked))
    };
    let orchestrator = AuthOrchestrator::new(args.mode, provider, handoff, Arc::new(LoggingNavigator))
        .with_policy(settings.policy);
    let handle = OnboardingHandle::new(orchestrator);

    for (name, value) in args.fields {
        if handle.set_field(name, value).await.is_none() {
            println!("Ignoring '{name}': not part of the {} form", args.mode);
        }
    }

    if args.dry_run {
        render(&handle.view().await);
        if !handle.can_submit().await {
            bail!("form is incomplete or invalid");
        }
        return Ok(());
    }

    let completion = match handle.submit().await {
        Ok(completion) => completion,
        Err(err) => {
            render(&handle.view().await);
            return Err(err.into());
        }
    };
    render(&handle.view().await);
    match completion {
        Completion::Applied(AuthPhase::Authenticated(_)) => {
            if let Some(Ok(identity)) = linked.as_mut().map(|rx| rx.try_recv()) {
                println!(
                    "Account linking handoff: {}",
                    serde_json::to_string(&identity)?
                );
            }
        }
        Completion::Applied(AuthPhase::Redirected) => {
            println!("Signed in; redirecting to {HOME_ROUTE}");
        }
        Completion::Applied(AuthPhase::Failed(err)) => {
            bail!("{}", err.display_message());
        }
        Completion::Applied(phase) => {
            tracing::warn!(?phase, "submission finished in an unexpected phase");
        }
        Completion::Discarded => {
            println!("Submission result discarded");
        }
    }
    Ok(())
}

fn render(view: &FormView) {
    println!("== {} ==", view.heading);
    println!("{}", view.subheading);
    for field in &view.fields {
        let value = field.value.as_deref().unwrap_or("");
        match &field.error {
            Some(error) => println!("  {:<14} {value:<24} ! {error}", field.label),
            None => println!("  {:<14} {value}", field.label),
        }
    }
    if let Some(banner) = &view.error_banner {
        println!("Error: {banner}");
    }
    if let Some(footer) = &view.footer {
        println!("{} {} ({})", footer.prompt, footer.label, footer.route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_field_arguments() {
        assert_eq!(
            parse_field("email=a@b.com"),
            Ok((FieldName::Email, "a@b.com".to_string()))
        );
        assert_eq!(
            parse_field("password=a=b"),
            Ok((FieldName::Password, "a=b".to_string()))
        );
        assert!(parse_field("email").is_err());
        assert!(parse_field("nickname=ada").is_err());
    }

    #[test]
    fn parses_cli_arguments() {
        let args = Args::try_parse_from([
            "onboard",
            "--mode",
            "sign-up",
            "--field",
            "ssn=1234",
            "--dry-run",
        ])
        .expect("args");
        assert_eq!(args.mode, FlowMode::SignUp);
        assert_eq!(args.fields, vec![(FieldName::Ssn, "1234".to_string())]);
        assert!(args.dry_run);
        assert!(!args.log_handoff);

        assert!(Args::try_parse_from(["onboard", "--mode", "register"]).is_err());

        let args = Args::try_parse_from(["onboard", "--mode", "sign-in", "--log-handoff"])
            .expect("args");
        assert!(args.log_handoff);
    }
}
