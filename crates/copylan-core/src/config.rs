// ── Runtime connection configuration ──
//
// These types describe *how* to reach the controller. They carry
// credential data and connection tuning, but never touch disk.
// The CLI constructs a `SessionConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use copylan_api::client::{DEFAULT_API_URL, DEFAULT_AUTH_URL};
use copylan_api::{ApiVersions, ServiceAccount};

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict). Default for the hosted controller.
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification.
    DangerAcceptInvalid,
}

/// Configuration for one authenticated controller session.
///
/// Built by the CLI, passed to [`connect()`](crate::session::connect) --
/// core never reads config files.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Controller API root.
    pub api_url: Url,
    /// OAuth2 token service root.
    pub auth_url: Url,
    /// Optional `x-panw-region` header value.
    pub region: Option<String>,
    /// Service-account credentials.
    pub account: ServiceAccount,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
    /// Per-resource API versions.
    pub versions: ApiVersions,
}

impl SessionConfig {
    /// A config pointed at the hosted controller with the given credentials.
    pub fn hosted(account: ServiceAccount) -> Self {
        Self {
            api_url: default_url(DEFAULT_API_URL),
            auth_url: default_url(DEFAULT_AUTH_URL),
            region: None,
            account,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            versions: ApiVersions::default(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::hosted(ServiceAccount {
            client_id: String::new(),
            client_secret: SecretString::from(String::new()),
            tsg_id: String::new(),
        })
    }
}

fn default_url(raw: &str) -> Url {
    Url::parse(raw).expect("built-in URL constant is valid")
}
