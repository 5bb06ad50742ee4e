//! Release proxy request handling.
//!
//! [`handle`] maps a requested path to one of three outcomes: the latest
//! version string, the streamed content of a release asset, or an error. It
//! takes everything it needs as arguments so it can be driven without a
//! running server.

use crate::error::RelayError;
use crate::github::GitHubClient;
use crate::types::Credential;

#[derive(Debug)]
pub enum ProxyResponse {
    /// Latest release version, without its tag marker.
    Version(String),
    /// Upstream response carrying the asset content.
    Asset(reqwest::Response),
    Error(RelayError),
}

/// Requested filename: the path with its leading separator removed.
pub fn requested_file(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

pub async fn handle(
    client: &GitHubClient,
    path: &str,
    credential: Option<&Credential>,
) -> ProxyResponse {
    match respond(client, path, credential).await {
        Ok(response) => response,
        Err(e) => {
            if e.is_upstream() {
                tracing::warn!("Upstream failure for '{}': {}", path, e);
            } else {
                tracing::info!("Rejected '{}': {}", path, e);
            }
            ProxyResponse::Error(e)
        }
    }
}

async fn respond(
    client: &GitHubClient,
    path: &str,
    credential: Option<&Credential>,
) -> Result<ProxyResponse, RelayError> {
    let credential = credential.ok_or(RelayError::MissingCredential)?;
    let file = requested_file(path);

    let release = client.latest_release(credential).await?;
    let version = release.version();

    if file.is_empty() {
        tracing::info!("Serving latest version {}", version);
        return Ok(ProxyResponse::Version(version.to_string()));
    }

    let asset = release
        .find_asset(file)
        .ok_or_else(|| RelayError::AssetNotFound {
            name: file.to_string(),
        })?;

    let response = client.fetch_asset(asset, credential).await?;
    tracing::info!(
        "Serving {} from release {} ({})",
        asset.name,
        release.tag_name,
        response.status()
    );
    Ok(ProxyResponse::Asset(response))
}
