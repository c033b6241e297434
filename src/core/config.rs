use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::errors::{Result, WalletError};

/// Chain id substituted when the node cannot report one.
pub const DEFAULT_FALLBACK_CHAIN_ID: &str = "mainnet";

/// Node connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the node HTTP API
    #[serde(default = "ClientConfig::default_node_url")]
    pub node_url: String,

    /// Per-request timeout enforced by the HTTP transport (seconds)
    #[serde(default = "ClientConfig::default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Chain id used when `GET /chain_id` fails
    #[serde(default = "ClientConfig::default_fallback_chain_id")]
    pub fallback_chain_id: String,

    #[serde(default = "ClientConfig::default_user_agent")]
    pub user_agent: String,
}

impl ClientConfig {
    fn default_node_url() -> String { "http://localhost:52260".to_string() }
    fn default_request_timeout_secs() -> u64 { 30 }
    fn default_fallback_chain_id() -> String { DEFAULT_FALLBACK_CHAIN_ID.to_string() }
    fn default_user_agent() -> String { format!("xian-wallet/{}", env!("CARGO_PKG_VERSION")) }

    /// Settings for a node at `node_url`, everything else defaulted.
    pub fn new(node_url: impl Into<String>) -> Self {
        Self { node_url: node_url.into(), ..Self::default() }
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ClientConfig =
            toml::from_str(text).map_err(|e| WalletError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading client config");
        let text = std::fs::read_to_string(path).map_err(|e| {
            WalletError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Apply `XIAN_NODE_URL`, `XIAN_REQUEST_TIMEOUT_SECS` and `XIAN_FALLBACK_CHAIN_ID`.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("XIAN_NODE_URL") {
            self.node_url = url;
        }
        if let Ok(raw) = std::env::var("XIAN_REQUEST_TIMEOUT_SECS") {
            match raw.trim().parse() {
                Ok(secs) => self.request_timeout_secs = secs,
                Err(_) => warn!(value = %raw, "Ignoring unparseable XIAN_REQUEST_TIMEOUT_SECS"),
            }
        }
        if let Ok(chain_id) = std::env::var("XIAN_FALLBACK_CHAIN_ID") {
            self.fallback_chain_id = chain_id;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.node_url.trim();
        if url.is_empty() {
            return Err(WalletError::Config("node_url must not be empty".to_string()));
        }
        reqwest::Url::parse(url)
            .map_err(|e| WalletError::Config(format!("invalid node_url '{}': {}", url, e)))?;
        if self.request_timeout_secs == 0 {
            return Err(WalletError::Config("request_timeout_secs must be positive".to_string()));
        }
        if self.fallback_chain_id.is_empty() {
            return Err(WalletError::Config("fallback_chain_id must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Node URL without a trailing slash, ready for path concatenation.
    pub fn base_url(&self) -> &str {
        self.node_url.trim().trim_end_matches('/')
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            node_url: Self::default_node_url(),
            request_timeout_secs: Self::default_request_timeout_secs(),
            fallback_chain_id: Self::default_fallback_chain_id(),
            user_agent: Self::default_user_agent(),
        }
    }
}
