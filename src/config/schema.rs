//! Configuration schema for paykit.toml.

use crate::error::{PaykitError, Result};
use crate::types::Environment;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Credentials and endpoint selection for building a toolkit.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolKitConfig {
    /// Payman API secret (sent as `x-payman-api-secret`).
    pub api_secret: String,

    /// Which Payman deployment to talk to.
    pub environment: Environment,

    /// Override for the environment's API base URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl ToolKitConfig {
    pub fn new(api_secret: impl Into<String>, environment: Environment) -> Self {
        Self {
            api_secret: api_secret.into(),
            environment,
            base_url: None,
        }
    }

    /// Point the client at a different API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Effective API base URL, without a trailing slash.
    pub fn resolved_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
            .trim_end_matches('/')
    }

    /// Reject configurations that cannot produce a working client.
    pub fn validate(&self) -> Result<()> {
        if self.api_secret.trim().is_empty() {
            return Err(PaykitError::Configuration(
                "api_secret must be a non-empty credential".into(),
            ));
        }
        if let Some(url) = &self.base_url {
            if url.trim().is_empty() {
                return Err(PaykitError::Configuration("base_url is empty".into()));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ToolKitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secret = if self.api_secret.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("ToolKitConfig")
            .field("api_secret", &secret)
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .finish()
    }
}
