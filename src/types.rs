use serde::{Deserialize, Serialize};
use std::fmt;

/// Latest release as reported by the GitHub releases API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GitHubRelease {
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<GitHubAsset>,
}

impl GitHubRelease {
    /// Version string derived from the tag by dropping its leading marker,
    /// e.g. `v1.2.3` -> `1.2.3`. An empty tag yields an empty version.
    pub fn version(&self) -> &str {
        let mut chars = self.tag_name.chars();
        chars.next();
        chars.as_str()
    }

    /// First asset whose name matches exactly.
    pub fn find_asset(&self, name: &str) -> Option<&GitHubAsset> {
        self.assets.iter().find(|a| a.name == name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GitHubAsset {
    pub name: String,
    /// API location of the asset; answers with a redirect to the content
    /// when requested as `application/octet-stream`.
    pub url: String,
    #[serde(default)]
    pub browser_download_url: Option<String>,
}

/// Value sent as the `Authorization` header on upstream calls.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for blank input, which counts as no credential.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}
