use std::{fs, path::Path};

use anyhow::Context;
use onboarding_core::ValidationPolicy;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "onboard.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub identity_url: Option<String>,
    pub policy: ValidationPolicy,
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    identity_url: Option<String>,
    password_min_len: Option<usize>,
    short_code_len: Option<usize>,
}

/// Defaults, then the config file (if present), then environment variables.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let path = config_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    match fs::read_to_string(path) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?,
        Err(err) if config_path.is_some() => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()));
        }
        Err(_) => {}
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.identity_url {
        settings.identity_url = Some(v);
    }
    if let Some(v) = file_cfg.password_min_len {
        settings.policy.password_min_len = v;
    }
    if let Some(v) = file_cfg.short_code_len {
        settings.policy.short_code_len = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("ONBOARD_IDENTITY_URL") {
        settings.identity_url = Some(v);
    }
    if let Some(v) = lookup("APP__IDENTITY_URL") {
        settings.identity_url = Some(v);
    }

    if let Some(v) = lookup("APP__PASSWORD_MIN_LEN") {
        match v.parse::<usize>() {
            Ok(parsed) => settings.policy.password_min_len = parsed,
            Err(_) => tracing::warn!(value = %v, "ignoring non-numeric APP__PASSWORD_MIN_LEN"),
        }
    }
    if let Some(v) = lookup("APP__SHORT_CODE_LEN") {
        match v.parse::<usize>() {
            Ok(parsed) => settings.policy.short_code_len = parsed,
            Err(_) => tracing::warn!(value = %v, "ignoring non-numeric APP__SHORT_CODE_LEN"),
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
