//! Configuration management module

use crate::error::handlers::ValidationErrorHandler;
use crate::error::{RegistryError, Result};
use std::time::Duration;

pub const DEFAULT_SERVER: &str = "localhost:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const TIMEOUT_ENV: &str = "REGISTRY_API_TIMEOUT";

/// Immutable base URL of a registry's v2 API, always `https://{server}/v2`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEndpoint {
    base_url: String,
}

impl RegistryEndpoint {
    /// Build the endpoint from `host[:port]`. A leading `https://` or `http://`
    /// is stripped; the API is always reached over https.
    pub fn new(server: &str) -> Result<Self> {
        let server = server
            .trim()
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/');

        ValidationErrorHandler::validate_server(server)?;

        let base_url = format!("https://{}/v2", server);
        url::Url::parse(&base_url).map_err(|e| {
            RegistryError::Validation(format!("Invalid registry server {}: {}", server, e))
        })?;

        Ok(Self { base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join a path below `/v2`. An empty path yields the API root `/v2/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl std::fmt::Display for RegistryEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.base_url)
    }
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: u64,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("docker-registry-api/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn validate(&self) -> Result<()> {
        ValidationErrorHandler::validate_timeout(self.timeout)
    }

    /// Create config from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        Self::default().with_timeout_var(std::env::var(TIMEOUT_ENV).ok().as_deref())
    }

    /// Apply a raw `REGISTRY_API_TIMEOUT` value. A value that is not a whole
    /// number of seconds is a validation error.
    fn with_timeout_var(self, raw: Option<&str>) -> Result<Self> {
        let Some(raw) = raw else {
            return Ok(self);
        };

        match raw.trim().parse() {
            Ok(timeout) => Ok(self.with_timeout(timeout)),
            Err(_) => {
                tracing::warn!(value = raw, "unparsable {}", TIMEOUT_ENV);
                Err(RegistryError::Validation(format!(
                    "{} must be a number of seconds, got {:?}",
                    TIMEOUT_ENV, raw
                )))
            }
        }
    }
}
