use crate::github::DEFAULT_API_BASE_URL;
use crate::types::Credential;
use anyhow::{Context, Result};
use std::net::SocketAddr;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

pub const TOKEN_ENV: &str = "TOKEN";
pub const BIND_ENV: &str = "RELAY_BIND";
pub const API_BASE_URL_ENV: &str = "RELAY_API_BASE_URL";

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub bind: SocketAddr,
    pub api_base_url: String,
    pub credential: Option<Credential>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            credential: None,
        }
    }
}

/// Load settings from defaults plus environment overrides.
pub fn load_config() -> Result<RelayConfig> {
    load_config_from(|key| std::env::var(key).ok())
}

/// Same as [`load_config`], reading variables through `lookup`.
pub fn load_config_from<F>(lookup: F) -> Result<RelayConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = RelayConfig::default();

    if let Some(bind) = lookup(BIND_ENV) {
        config.bind = parse_bind(&bind).with_context(|| format!("Invalid {}", BIND_ENV))?;
    }

    if let Some(base) = lookup(API_BASE_URL_ENV) {
        let base = base.trim();
        if !base.is_empty() {
            config.api_base_url = base.trim_end_matches('/').to_string();
        }
    }

    config.credential = lookup(TOKEN_ENV).and_then(Credential::new);
    tracing::debug!(
        "Loaded config: bind={}, api={}, credential={}",
        config.bind,
        config.api_base_url,
        if config.credential.is_some() { "set" } else { "missing" }
    );

    Ok(config)
}

pub fn parse_bind(value: &str) -> Result<SocketAddr> {
    value
        .trim()
        .parse::<SocketAddr>()
        .with_context(|| format!("Could not parse '{}' as a socket address", value))
}
