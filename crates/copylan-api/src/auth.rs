// Service-account authentication
//
// OAuth2 client-credentials grant against the token service, followed by
// a session profile lookup that establishes the tenant. The bearer token
// is stored on the client and attached to every subsequent request.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::client::{SdwanClient, parse_error};
use crate::error::Error;
use crate::models::{Profile, TokenResponse};

const TOKEN_PATH: &str = "oauth2/access_token";
const PROFILE_VERSION: &str = "v2.1";

/// Service-account credentials.
///
/// Missing values are carried as empty strings so that a run without
/// configured credentials fails at login rather than at argument parsing.
#[derive(Debug, Clone)]
pub struct ServiceAccount {
    pub client_id: String,
    pub client_secret: SecretString,
    /// Tenant service group id, sent as the `tsg_id:<id>` OAuth scope.
    pub tsg_id: String,
}

impl ServiceAccount {
    pub fn is_complete(&self) -> bool {
        !self.client_id.is_empty()
            && !self.client_secret.expose_secret().is_empty()
            && !self.tsg_id.is_empty()
    }
}

/// API version segment per resource family.
///
/// The controller versions each resource independently
/// (`/sdwan/v4.18/api/.../interfaces`, `/sdwan/v2.3/api/.../staticroutes`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiVersions {
    pub elements: String,
    pub interfaces: String,
    pub static_routes: String,
}

impl Default for ApiVersions {
    fn default() -> Self {
        Self {
            elements: "v3.0".into(),
            interfaces: "v4.18".into(),
            static_routes: "v2.3".into(),
        }
    }
}

impl SdwanClient {
    /// Authenticate with a service account.
    ///
    /// 1. `POST {auth}/oauth2/access_token` with HTTP basic auth and
    ///    `grant_type=client_credentials&scope=tsg_id:<tsg>`.
    /// 2. `GET {api}/sdwan/v2.1/api/profile` with the new bearer token.
    ///
    /// A profile without a `tenant_id` is treated as a failed login.
    pub async fn login(&self, account: &ServiceAccount) -> Result<Profile, Error> {
        let base = self.auth_url().as_str().trim_end_matches('/');
        let url = url::Url::parse(&format!("{base}/{TOKEN_PATH}"))?;

        debug!("requesting access token at {url}");

        let scope = format!("tsg_id:{}", account.tsg_id);
        let resp = self
            .http()
            .post(url)
            .basic_auth(&account.client_id, Some(account.client_secret.expose_secret()))
            .form(&[("grant_type", "client_credentials"), ("scope", scope.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let detail = parse_error(status, resp).await;
            return Err(Error::Authentication {
                message: format!("token request failed: {detail}"),
            });
        }

        let token: TokenResponse = self.handle_response(resp).await?;
        self.set_token(SecretString::from(token.access_token));

        let profile: Profile = self
            .get(self.api_url(PROFILE_VERSION, "profile")?)
            .await
            .map_err(|e| match e {
                Error::Api { status, message, .. } => Error::Authentication {
                    message: format!("profile lookup failed (HTTP {status}): {message}"),
                },
                other => other,
            })?;

        let tenant_id = profile
            .tenant_id
            .clone()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Authentication {
                message: "session profile has no tenant".into(),
            })?;

        debug!(%tenant_id, "login successful");
        self.set_tenant_id(tenant_id);
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_service_account_is_incomplete() {
        let account = ServiceAccount {
            client_id: String::new(),
            client_secret: SecretString::from(String::new()),
            tsg_id: String::new(),
        };
        assert!(!account.is_complete());
    }

    #[test]
    fn default_versions_cover_every_resource() {
        let v = ApiVersions::default();
        assert!(v.elements.starts_with('v'));
        assert!(v.interfaces.starts_with('v'));
        assert!(v.static_routes.starts_with('v'));
    }
}
