//! HTTP relay for the latest release of a GitHub repository.
//!
//! `GET /` answers with the latest version, `GET /<asset>` streams that asset
//! of the latest release.

pub mod config;
pub mod download;
pub mod error;
pub mod github;
pub mod handler;
pub mod server;
pub mod types;

pub use error::RelayError;
pub use github::GitHubClient;
pub use handler::{handle, ProxyResponse};
pub use types::{Credential, GitHubAsset, GitHubRelease};
