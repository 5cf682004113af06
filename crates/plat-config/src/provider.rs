//! Property-data provider configuration.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://api.gateway.attomdata.com/propertyapi/v1.0.0".to_string()
}

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    10
}

/// Default page size for postal/address searches.
const fn default_page_size() -> u32 {
    50
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Provider API root (no trailing slash).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Provider API key, sent as the `apikey` header.
    #[serde(default)]
    pub api_key: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum records requested per search.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            page_size: default_page_size(),
        }
    }
}

impl ProviderConfig {
    /// Check if the provider config has the minimum required fields.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}
