// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Client configuration.
//!
//! The endpoint and API key are supplied once when a client is built and are
//! never mutated afterwards. They can come from code, from the
//! `PDNS_API_ENDPOINT` / `PDNS_API_KEY` environment variables, or from a YAML
//! file:
//!
//! ```yaml
//! endpoint: http://127.0.0.1:8081/api/v1/servers/localhost
//! api_key: changeme
//! timeout_secs: 10
//! ```

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::constants::{ENV_API_ENDPOINT, ENV_API_KEY, ENV_API_TIMEOUT_SECS};
use crate::errors::{PdnsError, Result};

/// Connection settings for a PowerDNS server.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the server API, including the `/api/v1/servers/<id>` prefix
    pub endpoint: String,
    /// Value sent in the `X-API-Key` header
    pub api_key: String,
    /// Optional per-request timeout
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

// The API key must never end up in logs.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ClientConfig {
    /// Create a configuration from an endpoint and API key.
    ///
    /// # Errors
    ///
    /// Returns [`PdnsError::Config`] if either value is empty.
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let config = Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            timeout_secs: None,
        };
        config.validated()
    }

    /// Set the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = Some(timeout.as_secs());
        self
    }

    /// Read the configuration from `PDNS_API_ENDPOINT`, `PDNS_API_KEY` and
    /// the optional `PDNS_API_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns [`PdnsError::Config`] if a variable is missing or invalid.
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var(ENV_API_ENDPOINT)
            .map_err(|_| PdnsError::Config(format!("{ENV_API_ENDPOINT} is not set")))?;
        let api_key = std::env::var(ENV_API_KEY)
            .map_err(|_| PdnsError::Config(format!("{ENV_API_KEY} is not set")))?;
        let timeout_secs = match std::env::var(ENV_API_TIMEOUT_SECS) {
            Ok(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
                PdnsError::Config(format!("{ENV_API_TIMEOUT_SECS} is not a number: {e}"))
            })?),
            Err(_) => None,
        };

        Self {
            endpoint,
            api_key,
            timeout_secs,
        }
        .validated()
    }

    /// Load the configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`PdnsError::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| PdnsError::Config(format!("failed to read {}: {e}", path.display())))?;
        let config: Self = serde_yaml::from_str(&raw)
            .map_err(|e| PdnsError::Config(format!("failed to parse {}: {e}", path.display())))?;
        config.validated()
    }

    /// Request timeout, if one is configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// The endpoint with a scheme and without trailing slashes.
    #[must_use]
    pub fn base_url(&self) -> String {
        build_api_url(&self.endpoint)
    }

    fn validated(self) -> Result<Self> {
        if self.endpoint.trim().is_empty() {
            return Err(PdnsError::Config("endpoint must not be empty".into()));
        }
        if self.api_key.is_empty() {
            return Err(PdnsError::Config("api_key must not be empty".into()));
        }
        Ok(self)
    }
}

/// Build the API base URL from an endpoint.
///
/// Converts "pdns.example.net:8081/api/v1/servers/localhost" to
/// `<http://pdns.example.net:8081/api/v1/servers/localhost>`; endpoints that
/// already carry a scheme only lose their trailing slashes.
#[must_use]
pub fn build_api_url(endpoint: &str) -> String {
    let endpoint = endpoint.trim().trim_end_matches('/');
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else {
        format!("http://{endpoint}")
    }
}
