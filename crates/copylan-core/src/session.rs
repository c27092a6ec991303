// ── Controller session ──
//
// Builds the HTTP transport from a `SessionConfig`, logs in, and hands
// back a ready client. `oneshot` wraps a whole copy run for the CLI.

use copylan_api::{SdwanClient, TlsMode, TransportConfig};
use tracing::{debug, info};

use crate::config::{SessionConfig, TlsVerification};
use crate::directory::Directory;
use crate::error::CoreError;
use crate::summary::RunSummary;
use crate::sync::{self, SyncRequest};

/// Create a client for `config` and authenticate it.
pub async fn connect(config: &SessionConfig) -> Result<SdwanClient, CoreError> {
    if !config.account.is_complete() {
        debug!("service account is incomplete; login will likely be rejected");
    }

    let client = SdwanClient::new(
        config.api_url.clone(),
        config.auth_url.clone(),
        config.region.as_deref(),
        &build_transport(config),
    )?
    .with_versions(config.versions.clone());

    let profile = client.login(&config.account).await?;
    info!(
        tenant = profile.tenant_id.as_deref().unwrap_or_default(),
        "authenticated"
    );
    Ok(client)
}

/// Connect, index elements, and run one copy.
pub async fn oneshot(config: &SessionConfig, request: &SyncRequest) -> Result<RunSummary, CoreError> {
    let client = connect(config).await?;
    let directory = Directory::fetch(&client).await?;
    sync::run(&client, &directory, request).await
}

fn build_transport(config: &SessionConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
