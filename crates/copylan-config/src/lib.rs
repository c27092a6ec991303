//! Profile configuration for copylanconfig.
//!
//! TOML profiles, service-account secret resolution (env + keyring +
//! plaintext), and translation to `copylan_core::SessionConfig`. The CLI
//! layers its flag overrides on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use copylan_core::{ServiceAccount, SessionConfig, TlsVerification};

/// Keyring service name under which client secrets are stored.
pub const KEYRING_SERVICE: &str = "copylanconfig";

/// Environment prefix for config overrides (`COPYLAN_PROFILES__LAB__TSG_ID`).
pub const ENV_PREFIX: &str = "COPYLAN_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{profile}' is not defined")]
    UnknownProfile { profile: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named service-account profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named service-account profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// OAuth2 client id (`name@tsg.iam.panserviceaccount.com`).
    pub client_id: Option<String>,

    /// Client secret (plaintext -- prefer keyring or env var).
    pub client_secret: Option<String>,

    /// Environment variable name containing the client secret.
    pub client_secret_env: Option<String>,

    /// Tenant service group id.
    pub tsg_id: Option<String>,

    /// Controller API root override.
    pub api_url: Option<String>,

    /// OAuth2 token service root override.
    pub auth_url: Option<String>,

    /// `x-panw-region` header value.
    pub region: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,
}

impl Config {
    /// The profile name in effect when no flag selects one.
    pub fn active_profile_name(&self) -> &str {
        self.default_profile.as_deref().unwrap_or("default")
    }

    /// Look up a profile. A missing `default` profile yields an empty one
    /// so a run driven purely by flags and env still works.
    pub fn profile(&self, name: &str) -> Result<Profile, ConfigError> {
        match self.profiles.get(name) {
            Some(profile) => Ok(profile.clone()),
            None if name == "default" => Ok(Profile::default()),
            None => Err(ConfigError::UnknownProfile {
                profile: name.into(),
            }),
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "copylanconfig", "copylanconfig").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("copylanconfig");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the Config from a specific file + environment.
///
/// A missing file is not an error; defaults and env still apply.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Credential resolution (without CLI flags) ───────────────────────

/// Resolve the client secret for a profile.
///
/// Order: explicit value (flag or `PRISMASASE_CLIENT_SECRET`) →
/// `client_secret_env` → system keyring → plaintext. An unresolvable
/// secret becomes an empty string so the failure surfaces as a rejected
/// login.
pub fn resolve_client_secret(
    explicit: Option<&str>,
    profile: &Profile,
    profile_name: &str,
) -> SecretString {
    if let Some(secret) = explicit {
        return SecretString::from(secret.to_owned());
    }
    resolve_secret_chain(profile, || keyring_secret(profile_name))
}

fn keyring_secret(profile_name: &str) -> Option<String> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/client-secret"))
        .ok()?
        .get_password()
        .ok()
}

fn resolve_secret_chain(profile: &Profile, keyring: impl FnOnce() -> Option<String>) -> SecretString {
    // 1. Profile's client_secret_env → env var lookup
    if let Some(ref env_name) = profile.client_secret_env {
        if let Ok(val) = std::env::var(env_name) {
            return SecretString::from(val);
        }
    }

    // 2. System keyring
    if let Some(secret) = keyring() {
        return SecretString::from(secret);
    }

    // 3. Plaintext in config
    SecretString::from(profile.client_secret.clone().unwrap_or_default())
}

/// Parse a profile URL field, falling back to the built-in default.
pub fn parse_url(field: &str, value: Option<&str>, default: &Url) -> Result<Url, ConfigError> {
    match value {
        None => Ok(default.clone()),
        Some(raw) => raw.parse().map_err(|e| ConfigError::Validation {
            field: field.into(),
            reason: format!("invalid URL '{raw}': {e}"),
        }),
    }
}

/// Build a `SessionConfig` from a profile.
///
/// Callers fold their own overrides into `profile` first; only the client
/// secret is passed separately so an explicit value skips the keyring.
pub fn profile_to_session_config(
    profile: &Profile,
    profile_name: &str,
    explicit_secret: Option<&str>,
) -> Result<SessionConfig, ConfigError> {
    let account = ServiceAccount {
        client_id: profile.client_id.clone().unwrap_or_default(),
        client_secret: resolve_client_secret(explicit_secret, profile, profile_name),
        tsg_id: profile.tsg_id.clone().unwrap_or_default(),
    };

    let mut session = SessionConfig::hosted(account);
    session.api_url = parse_url("api_url", profile.api_url.as_deref(), &session.api_url)?;
    session.auth_url = parse_url("auth_url", profile.auth_url.as_deref(), &session.auth_url)?;
    session.region.clone_from(&profile.region);
    session.tls = tls_for(profile, false);
    if let Some(secs) = profile.timeout {
        session.timeout = Duration::from_secs(secs);
    }
    Ok(session)
}

/// TLS mode for a profile; `force_insecure` wins over everything.
pub fn tls_for(profile: &Profile, force_insecure: bool) -> TlsVerification {
    if force_insecure || profile.insecure.unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use figment::Jail;
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn loads_profiles_from_toml() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                    default_profile = "lab"

                    [profiles.lab]
                    client_id = "svc@1234.iam.panserviceaccount.com"
                    tsg_id = "1234"
                    region = "europe"
                    timeout = 10
                "#,
            )?;

            let config = load_config_from(Path::new("config.toml")).map_err(|e| e.to_string())?;

            assert_eq!(config.active_profile_name(), "lab");
            let lab = config.profile("lab").map_err(|e| e.to_string())?;
            assert_eq!(lab.tsg_id.as_deref(), Some("1234"));
            assert_eq!(lab.timeout, Some(10));
            assert_eq!(config.defaults.output, "table");
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[profiles.lab]\nregion = \"europe\"\n")?;
            jail.set_env("COPYLAN_PROFILES__LAB__REGION", "americas");
            jail.set_env("COPYLAN_DEFAULT_PROFILE", "lab");

            let config = load_config_from(Path::new("config.toml")).map_err(|e| e.to_string())?;

            assert_eq!(config.active_profile_name(), "lab");
            assert_eq!(config.profiles["lab"].region.as_deref(), Some("americas"));
            Ok(())
        });
    }

    #[test]
    fn missing_file_yields_defaults() {
        Jail::expect_with(|_| {
            let config = load_config_from(Path::new("absent.toml")).map_err(|e| e.to_string())?;
            assert_eq!(config.active_profile_name(), "default");
            assert!(config.profiles.is_empty());
            assert_eq!(config.defaults.timeout, 30);
            Ok(())
        });
    }

    #[test]
    fn unknown_profile_is_an_error_but_default_is_implicit() {
        let config = Config::default();
        assert!(config.profile("default").is_ok());
        assert!(matches!(
            config.profile("prod"),
            Err(ConfigError::UnknownProfile { .. })
        ));
    }

    #[test]
    fn secret_prefers_env_then_keyring_then_plaintext() {
        Jail::expect_with(|jail| {
            jail.set_env("LAB_SECRET", "from-env");
            let profile = Profile {
                client_secret: Some("plain".into()),
                client_secret_env: Some("LAB_SECRET".into()),
                ..Profile::default()
            };
            let secret = resolve_secret_chain(&profile, || Some("from-keyring".into()));
            assert_eq!(secret.expose_secret(), "from-env");

            let profile = Profile {
                client_secret_env: None,
                ..profile
            };
            let secret = resolve_secret_chain(&profile, || Some("from-keyring".into()));
            assert_eq!(secret.expose_secret(), "from-keyring");

            let secret = resolve_secret_chain(&profile, || None);
            assert_eq!(secret.expose_secret(), "plain");
            Ok(())
        });
    }

    #[test]
    fn explicit_secret_and_profile_build_a_session() {
        let profile = Profile {
            client_id: Some("svc".into()),
            tsg_id: Some("42".into()),
            api_url: Some("https://api.example.com".into()),
            region: Some("europe".into()),
            timeout: Some(5),
            ..Profile::default()
        };

        let session = profile_to_session_config(&profile, "lab", Some("s3cret")).unwrap();

        assert_eq!(session.account.client_id, "svc");
        assert_eq!(session.account.client_secret.expose_secret(), "s3cret");
        assert_eq!(session.api_url.as_str(), "https://api.example.com/");
        assert_eq!(session.auth_url.as_str(), "https://auth.apps.paloaltonetworks.com/");
        assert_eq!(session.region.as_deref(), Some("europe"));
        assert_eq!(session.timeout, Duration::from_secs(5));
    }

    #[test]
    fn absent_secret_is_empty() {
        let secret = resolve_secret_chain(&Profile::default(), || None);
        assert_eq!(secret.expose_secret(), "");
    }

    #[test]
    fn profile_urls_are_validated() {
        let profile = Profile {
            api_url: Some("not a url".into()),
            ..Profile::default()
        };
        let base = Url::parse("https://api.example.com").unwrap();
        let err = parse_url("api_url", profile.api_url.as_deref(), &base).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "api_url"));
        assert_eq!(parse_url("api_url", None, &base).unwrap(), base);
    }

    #[test]
    fn tls_prefers_insecure_then_ca() {
        let profile = Profile {
            ca_cert: Some(PathBuf::from("/etc/ca.pem")),
            ..Profile::default()
        };
        assert_eq!(
            tls_for(&profile, false),
            TlsVerification::CustomCa(PathBuf::from("/etc/ca.pem"))
        );
        assert_eq!(tls_for(&profile, true), TlsVerification::DangerAcceptInvalid);
        assert_eq!(
            tls_for(&Profile::default(), false),
            TlsVerification::SystemDefaults
        );
    }
}
