use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use crate::validators::validate_url;

/// Well-known public DoH endpoint speaking the JSON API.
pub const DEFAULT_DOH_URL: &str = "https://dns.google/resolve";

/// Request timeout of the shared default HTTP client, in seconds.
pub const DEFAULT_DOH_TIMEOUT_SECS: u64 = 10;

/// Which DNS backend the resolver should be wired to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendSelection {
    /// Host resolver configuration, no DoH.
    System,
    /// The shared default DoH instance.
    DefaultDoh,
    /// DoH against a caller-supplied endpoint.
    CustomDoh(String),
}

/// DNS-over-HTTPS configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DohConfig {
    /// Use the default DoH endpoint (default: false)
    #[serde(default)]
    pub enabled: bool,

    /// Custom DoH endpoint. Takes precedence over `enabled`.
    #[serde(default)]
    pub url: Option<String>,

    /// Request timeout of the HTTP client in seconds (default: 10)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl DohConfig {
    pub fn backend(&self) -> BackendSelection {
        match &self.url {
            Some(url) => BackendSelection::CustomDoh(url.clone()),
            None if self.enabled => BackendSelection::DefaultDoh,
            None => BackendSelection::System,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.url {
            validate_url(url).map_err(|e| ConfigError::Invalid(format!("doh.url: {e}")))?;
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "doh.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for DohConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_DOH_TIMEOUT_SECS
}
