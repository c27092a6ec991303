// ── Core error types ──
//
// Run-level errors from copylan-core. Every variant here is fatal to a
// run; per-item create/update failures are recorded in the `RunSummary`
// instead. The `From<copylan_api::Error>` impl translates transport-layer
// errors into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to controller at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Controller request timed out")]
    Timeout,

    // ── Pre-flight errors ────────────────────────────────────────────
    #[error("Element not found: {name}")]
    ElementNotFound { name: String },

    #[error("Element '{name}' is not assigned to a site")]
    ElementUnassigned { name: String },

    #[error("Parent interface '{interface}' not found on element '{element}'")]
    ParentInterfaceNotFound { interface: String, element: String },

    #[error(
        "Interface models differ: '{source_element}' uses {source_taxonomy}, \
         '{destination_element}' uses {destination_taxonomy}"
    )]
    TaxonomyMismatch {
        source_element: String,
        source_taxonomy: String,
        destination_element: String,
        destination_taxonomy: String,
    },

    // ── Mid-flight errors ────────────────────────────────────────────
    /// A listing call failed; the run cannot reconcile without it.
    #[error("Could not retrieve {resource} for element '{element}': {message}")]
    ListFailed {
        resource: String,
        element: String,
        message: String,
    },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// The controller's error code (e.g., "INTERFACE_CONFIG_INVALID").
        code: Option<String>,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Wrap a listing failure with the resource and element it concerned.
    pub(crate) fn list_failed(resource: &str, element: &str, err: &copylan_api::Error) -> Self {
        Self::ListFailed {
            resource: resource.into(),
            element: element.into(),
            message: err.to_string(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<copylan_api::Error> for CoreError {
    fn from(err: copylan_api::Error) -> Self {
        match err {
            copylan_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            copylan_api::Error::NotAuthenticated => CoreError::AuthenticationFailed {
                message: "no active session".into(),
            },
            copylan_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        code: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            copylan_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            copylan_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            copylan_api::Error::Api {
                message,
                code,
                status: 401,
            } => CoreError::AuthenticationFailed {
                message: match code {
                    Some(c) => format!("{c}: {message}"),
                    None => message,
                },
            },
            copylan_api::Error::Api {
                message,
                code,
                status,
            } => CoreError::Api {
                message,
                code,
                status: Some(status),
            },
            copylan_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
