// Controller HTTP client
//
// Wraps `reqwest::Client` with bearer-token injection, versioned URL
// construction, and error-body parsing. Endpoint groups (elements,
// interfaces, static routes) are implemented as inherent methods in
// separate files to keep this module focused on transport mechanics.

use std::sync::RwLock;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::ApiVersions;
use crate::error::Error;
use crate::models::ErrorBody;
use crate::transport::TransportConfig;

/// Default controller API root.
pub const DEFAULT_API_URL: &str = "https://api.sase.paloaltonetworks.com";
/// Default OAuth2 token service root.
pub const DEFAULT_AUTH_URL: &str = "https://auth.apps.paloaltonetworks.com";

/// Raw HTTP client for the Prisma SD-WAN controller.
///
/// Every resource call carries the bearer token obtained by
/// [`login()`](Self::login). List calls return the unwrapped `items`
/// array -- the envelope is stripped before the caller sees it.
#[derive(Debug)]
pub struct SdwanClient {
    http: reqwest::Client,
    base_url: Url,
    auth_url: Url,
    versions: ApiVersions,
    /// Bearer token, set by `login()`.
    token: RwLock<Option<SecretString>>,
    /// Tenant resolved from the session profile.
    tenant_id: RwLock<Option<String>>,
}

impl SdwanClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `region`, when set, is sent as `x-panw-region` on every request.
    pub fn new(
        base_url: Url,
        auth_url: Url,
        region: Option<&str>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        if let Some(region) = region {
            let value = HeaderValue::from_str(region).map_err(|e| Error::Authentication {
                message: format!("invalid region header value: {e}"),
            })?;
            headers.insert("x-panw-region", value);
        }
        let http = transport.build_client_with_headers(headers)?;
        Ok(Self::with_client(http, base_url, auth_url))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, auth_url: Url) -> Self {
        Self {
            http,
            base_url,
            auth_url,
            versions: ApiVersions::default(),
            token: RwLock::new(None),
            tenant_id: RwLock::new(None),
        }
    }

    /// Override the per-resource API versions.
    pub fn with_versions(mut self, versions: ApiVersions) -> Self {
        self.versions = versions;
        self
    }

    /// The underlying HTTP client (for auth flows that need direct access).
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The controller base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The OAuth2 token service base URL.
    pub fn auth_url(&self) -> &Url {
        &self.auth_url
    }

    pub fn versions(&self) -> &ApiVersions {
        &self.versions
    }

    /// Tenant id resolved at login, if any.
    pub fn tenant_id(&self) -> Option<String> {
        self.tenant_id
            .read()
            .expect("tenant lock poisoned")
            .clone()
    }

    // ── Session state ────────────────────────────────────────────────

    pub(crate) fn set_token(&self, token: SecretString) {
        debug!("storing bearer token");
        *self.token.write().expect("token lock poisoned") = Some(token);
    }

    pub(crate) fn set_tenant_id(&self, tenant_id: String) {
        *self.tenant_id.write().expect("tenant lock poisoned") = Some(tenant_id);
    }

    /// Apply the stored bearer token to a request builder.
    ///
    /// The guard is dropped before returning so no lock is held across `.await`.
    fn authorize(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder, Error> {
        let guard = self.token.read().expect("token lock poisoned");
        match guard.as_ref() {
            Some(token) => Ok(builder.bearer_auth(token.expose_secret())),
            None => Err(Error::NotAuthenticated),
        }
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/sdwan/{version}/api/{path}`.
    pub(crate) fn api_url(&self, version: &str, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/sdwan/{version}/api/{path}"))?)
    }

    /// Build an element-scoped URL:
    /// `{base}/sdwan/{version}/api/sites/{site}/elements/{element}/{path}`
    pub(crate) fn element_url(
        &self,
        version: &str,
        site_id: &str,
        element_id: &str,
        path: &str,
    ) -> Result<Url, Error> {
        self.api_url(
            version,
            &format!("sites/{site_id}/elements/{element_id}/{path}"),
        )
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the response body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");

        let builder = self.authorize(self.http.get(url))?;
        let resp = builder.send().await?;
        self.handle_response(resp).await
    }

    /// Send a POST request with JSON body.
    ///
    /// Writes only report success; the echoed record is not decoded.
    pub(crate) async fn post(&self, url: Url, body: &(impl Serialize + Sync)) -> Result<(), Error> {
        debug!("POST {url}");

        let builder = self.authorize(self.http.post(url).json(body))?;
        let resp = builder.send().await?;
        expect_success(resp).await
    }

    /// Send a PUT request with JSON body.
    pub(crate) async fn put(&self, url: Url, body: &(impl Serialize + Sync)) -> Result<(), Error> {
        debug!("PUT {url}");

        let builder = self.authorize(self.http.put(url).json(body))?;
        let resp = builder.send().await?;
        expect_success(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    pub(crate) async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(parse_error(status, resp).await);
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }
}

/// Accept any 2xx status regardless of body.
async fn expect_success(resp: reqwest::Response) -> Result<(), Error> {
    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(parse_error(status, resp).await)
    }
}

/// Turn a non-2xx response into a structured [`Error::Api`].
///
/// The controller reports failures as `{"_error": [{code, message}]}`;
/// bodies that don't match fall back to the raw text.
pub(crate) async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
    let raw = resp.text().await.unwrap_or_default();

    if let Ok(body) = serde_json::from_str::<ErrorBody>(&raw) {
        if let Some(first) = body.errors.into_iter().next() {
            return Error::Api {
                status: status.as_u16(),
                message: first.message.unwrap_or_else(|| status.to_string()),
                code: first.code,
            };
        }
    }

    Error::Api {
        status: status.as_u16(),
        message: if raw.is_empty() {
            status.to_string()
        } else {
            raw.chars().take(200).collect()
        },
        code: None,
    }
}
