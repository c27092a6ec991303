//! CLI configuration -- thin wrapper around `copylan_config`.
//!
//! Folds `GlobalOpts` flag overrides (--client-id, --api-url, etc.) into
//! the selected profile before building the session.

use clap::ValueEnum;
use copylan_config::{Config, Profile};
use copylan_core::SessionConfig;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .unwrap_or_else(|| config.active_profile_name().to_owned())
}

/// Build a `SessionConfig` from the loaded config with flag overrides applied.
pub fn build_session_config(global: &GlobalOpts, cfg: &Config) -> Result<SessionConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);

    let mut profile = cfg.profile(&profile_name).map_err(|_| {
        let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
        available.sort();
        CliError::ProfileNotFound {
            name: profile_name.clone(),
            available: if available.is_empty() {
                "(none)".into()
            } else {
                available.join(", ")
            },
            path: copylan_config::config_path().display().to_string(),
        }
    })?;

    apply_overrides(&mut profile, global, cfg);
    tracing::debug!(profile = %profile_name, "resolved profile");

    Ok(copylan_config::profile_to_session_config(
        &profile,
        &profile_name,
        global.client_secret.as_deref(),
    )?)
}

/// `--output` (or `COPYLAN_OUTPUT`) > `defaults.output`.
pub fn output_format(global: &GlobalOpts, cfg: &Config) -> Result<OutputFormat, CliError> {
    match &global.output {
        Some(format) => Ok(format.clone()),
        None => parse_default("defaults.output", &cfg.defaults.output),
    }
}

/// `--color` > `defaults.color`.
pub fn color_mode(global: &GlobalOpts, cfg: &Config) -> Result<ColorMode, CliError> {
    match &global.color {
        Some(mode) => Ok(mode.clone()),
        None => parse_default("defaults.color", &cfg.defaults.color),
    }
}

fn parse_default<T: ValueEnum>(field: &str, value: &str) -> Result<T, CliError> {
    T::from_str(value, true).map_err(|reason| CliError::Validation {
        field: field.into(),
        reason,
    })
}

/// CLI flag (or its env var) > profile > config defaults.
fn apply_overrides(profile: &mut Profile, global: &GlobalOpts, cfg: &Config) {
    override_field(&mut profile.client_id, global.client_id.as_ref());
    override_field(&mut profile.tsg_id, global.tsg_id.as_ref());
    override_field(&mut profile.api_url, global.api_url.as_ref());
    override_field(&mut profile.auth_url, global.auth_url.as_ref());
    override_field(&mut profile.region, global.region.as_ref());

    profile.insecure =
        Some(global.insecure || profile.insecure.unwrap_or(cfg.defaults.insecure));
    profile.timeout = Some(
        global
            .timeout
            .or(profile.timeout)
            .unwrap_or(cfg.defaults.timeout),
    );
}

fn override_field(slot: &mut Option<String>, flag: Option<&String>) {
    if let Some(value) = flag {
        *slot = Some(value.clone());
    }
}
