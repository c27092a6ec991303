//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use copylan_config::ConfigError;
use copylan_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const PARTIAL: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to controller at {url}")]
    #[diagnostic(
        code(copylan::connection_failed),
        help(
            "{reason}\n\
             Check --api-url / --auth-url, or use --insecure (-k) behind an intercepting proxy."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(copylan::timeout),
        help("Increase the timeout with --timeout or check controller responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(copylan::auth_failed),
        help(
            "Verify the service account client id, secret and TSG id.\n\
             Set PRISMASASE_CLIENT_ID / PRISMASASE_CLIENT_SECRET / PRISMASASE_TSG_ID,\n\
             or configure them in a profile (see --profile)."
        )
    )]
    AuthFailed { message: String },

    // ── Pre-flight ───────────────────────────────────────────────────
    #[error("Element '{name}' not found")]
    #[diagnostic(
        code(copylan::element_not_found),
        help("Element names are matched exactly, including case.")
    )]
    ElementNotFound { name: String },

    #[error("Element '{name}' is not assigned to a site")]
    #[diagnostic(
        code(copylan::element_unassigned),
        help("Claim and assign the element to a site before copying configuration.")
    )]
    ElementUnassigned { name: String },

    #[error("Parent interface '{interface}' not found on '{element}'")]
    #[diagnostic(
        code(copylan::parent_not_found),
        help("Pass the port name that carries the sub-interfaces with --parent_interface (-P).")
    )]
    ParentInterfaceNotFound { interface: String, element: String },

    #[error("{message}")]
    #[diagnostic(
        code(copylan::taxonomy_mismatch),
        help("Source and destination must both use sub-interfaces or both use SVIs.")
    )]
    TaxonomyMismatch { message: String },

    // ── Mid-flight ───────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(copylan::list_failed))]
    ListFailed { message: String },

    #[error("API error ({code}): {message}")]
    #[diagnostic(code(copylan::api_error))]
    ApiError { code: String, message: String },

    #[error("{failed} of {total} changes failed to apply")]
    #[diagnostic(
        code(copylan::partial_failure),
        help("Re-run with -v for per-item details; applied changes were not rolled back.")
    )]
    PartialFailure { failed: usize, total: usize },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(copylan::validation))]
    Validation { field: String, reason: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(copylan::profile_not_found),
        help("Available profiles: {available}\nConfig file: {path}")
    )]
    ProfileNotFound {
        name: String,
        available: String,
        path: String,
    },

    #[error("Configuration could not be loaded: {message}")]
    #[diagnostic(code(copylan::config))]
    Config { message: String },

    #[error("Internal error: {0}")]
    #[diagnostic(code(copylan::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::ElementNotFound { .. }
            | Self::ElementUnassigned { .. }
            | Self::ParentInterfaceNotFound { .. }
            | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            Self::PartialFailure { .. } => exit_code::PARTIAL,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::Timeout => CliError::Timeout,

            CoreError::ElementNotFound { name } => CliError::ElementNotFound { name },

            CoreError::ElementUnassigned { name } => CliError::ElementUnassigned { name },

            CoreError::ParentInterfaceNotFound { interface, element } => {
                CliError::ParentInterfaceNotFound { interface, element }
            }

            err @ CoreError::TaxonomyMismatch { .. } => CliError::TaxonomyMismatch {
                message: err.to_string(),
            },

            err @ CoreError::ListFailed { .. } => CliError::ListFailed {
                message: err.to_string(),
            },

            CoreError::Api {
                message,
                code,
                status,
            } => CliError::ApiError {
                code: code
                    .or_else(|| status.map(|s| format!("HTTP {s}")))
                    .unwrap_or_default(),
                message,
            },

            CoreError::Config { message } => CliError::Config { message },

            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::UnknownProfile { profile } => CliError::ProfileNotFound {
                name: profile,
                available: String::new(),
                path: copylan_config::config_path().display().to_string(),
            },
            ConfigError::Figment(e) => CliError::Config {
                message: e.to_string(),
            },
        }
    }
}
