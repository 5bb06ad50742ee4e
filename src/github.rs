//! GitHub API interaction module
//!
//! Fetches the latest release of the relayed repository and resolves asset
//! downloads, which GitHub serves as a redirect to short-lived CDN URLs.

use crate::error::RelayError;
use crate::types::{Credential, GitHubAsset, GitHubRelease};
use reqwest::header::{ACCEPT, AUTHORIZATION, LOCATION};
use reqwest::redirect::Policy;
use reqwest::{Response, Url};

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const REPOSITORY: &str = "lemueld6200/my_afse";

const USER_AGENT: &str = concat!("release-relay/", env!("CARGO_PKG_VERSION"));
const GITHUB_JSON: &str = "application/vnd.github+json";
const OCTET_STREAM: &str = "application/octet-stream";

/// Build GitHub API URL for fetching the latest release
///
/// # Arguments
/// * `api_base_url` - API root, normally `https://api.github.com`
/// * `repo` - Repository in format "owner/repo"
pub fn build_latest_release_url(api_base_url: &str, repo: &str) -> String {
    format!(
        "{}/repos/{}/releases/latest",
        api_base_url.trim_end_matches('/'),
        repo
    )
}

/// Resolve a `Location` header value against the URL that produced it.
/// Absolute locations are returned unchanged.
pub fn resolve_location(base: &Url, location: &str) -> Option<Url> {
    base.join(location).ok()
}

#[derive(Debug, Clone)]
pub struct GitHubClient {
    api_base_url: String,
    /// Follows redirects; used for metadata and final content.
    client: reqwest::Client,
    /// Never follows redirects; used to read the asset `Location`.
    no_redirect: reqwest::Client,
}

impl GitHubClient {
    pub fn new(api_base_url: impl Into<String>) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let no_redirect = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .redirect(Policy::none())
            .build()?;

        Ok(Self {
            api_base_url: api_base_url.into(),
            client,
            no_redirect,
        })
    }

    /// Fetch the latest release of [`REPOSITORY`].
    pub async fn latest_release(
        &self,
        credential: &Credential,
    ) -> Result<GitHubRelease, RelayError> {
        let url = build_latest_release_url(&self.api_base_url, REPOSITORY);
        tracing::debug!("Fetching GitHub release info from: {}", url);

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, credential.as_str())
            .header(ACCEPT, GITHUB_JSON)
            .send()
            .await
            .map_err(|source| RelayError::UpstreamRequest {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(RelayError::UpstreamStatus {
                url,
                status: response.status(),
            });
        }

        let release: GitHubRelease = response
            .json()
            .await
            .map_err(|source| RelayError::UpstreamRequest {
                url: url.clone(),
                source,
            })?;

        tracing::debug!(
            "Latest release {} has {} asset(s)",
            release.tag_name,
            release.assets.len()
        );
        Ok(release)
    }

    /// Retrieve an asset's content.
    ///
    /// The asset URL is requested with redirects disabled. A 3xx answer is
    /// followed by hand to its `Location`, without the credential, and that
    /// response is returned whatever its status. A 2xx answer is returned as-is.
    pub async fn fetch_asset(
        &self,
        asset: &GitHubAsset,
        credential: &Credential,
    ) -> Result<Response, RelayError> {
        tracing::debug!("Resolving asset {} via {}", asset.name, asset.url);

        let response = self
            .no_redirect
            .get(&asset.url)
            .header(AUTHORIZATION, credential.as_str())
            .header(ACCEPT, OCTET_STREAM)
            .send()
            .await
            .map_err(|source| RelayError::UpstreamRequest {
                url: asset.url.clone(),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!("Asset {} served directly ({})", asset.name, status);
            return Ok(response);
        }
        if !status.is_redirection() {
            return Err(RelayError::UpstreamStatus {
                url: asset.url.clone(),
                status,
            });
        }

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|loc| resolve_location(response.url(), loc))
            .ok_or_else(|| RelayError::UpstreamRedirect {
                url: asset.url.clone(),
            })?;

        tracing::debug!("Asset {} redirected ({}), following", asset.name, status);

        self.client
            .get(location.clone())
            .send()
            .await
            .map_err(|source| RelayError::UpstreamRequest {
                url: location.to_string(),
                source,
            })
    }
}
