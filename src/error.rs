//! Error taxonomy for relay requests.

use reqwest::StatusCode;
use thiserror::Error;

pub const INVALID_TOKEN: &str = "Invalid token";
pub const FILE_NOT_FOUND: &str = "File not found";
pub const UPSTREAM_FAILED: &str = "Upstream request failed";

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("no credential configured")]
    MissingCredential,

    #[error("asset '{name}' not found in latest release")]
    AssetNotFound { name: String },

    #[error("request to {url} failed: {source}")]
    UpstreamRequest {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}")]
    UpstreamStatus { url: String, status: StatusCode },

    #[error("redirect from {url} has no usable Location header")]
    UpstreamRedirect { url: String },
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::MissingCredential => StatusCode::UNAUTHORIZED,
            RelayError::AssetNotFound { .. } => StatusCode::NOT_FOUND,
            RelayError::UpstreamRequest { .. }
            | RelayError::UpstreamStatus { .. }
            | RelayError::UpstreamRedirect { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    /// Text returned to the caller. Upstream details stay in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            RelayError::MissingCredential => INVALID_TOKEN,
            RelayError::AssetNotFound { .. } => FILE_NOT_FOUND,
            _ => UPSTREAM_FAILED,
        }
    }

    pub fn is_upstream(&self) -> bool {
        self.status_code() == StatusCode::BAD_GATEWAY
    }
}
