//! Out step configuration
//!
//! Combines the command-line arguments handed over by the CI runner with the
//! connection settings found in the request's `source`.

use std::path::PathBuf;
use std::time::Duration;

use pipeline_resource_core::InputError;
use pipeline_resource_core::dto::out::Source;

/// Default timeout applied to every request against the CI server
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Out step configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory that config and vars file paths are resolved against
    pub sources_dir: PathBuf,

    /// CI server base URL (e.g., "https://ci.example.com")
    pub target: String,

    /// Accept invalid TLS certificates from the CI server
    pub insecure: bool,

    /// Per-request timeout for calls to the CI server
    pub request_timeout: Duration,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(sources_dir: PathBuf, target: String) -> Self {
        Self {
            sources_dir,
            target,
            insecure: false,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Creates configuration from a request's `source`
    pub fn from_source(sources_dir: PathBuf, source: &Source) -> Result<Self, InputError> {
        let mut config = Self::new(sources_dir, source.target.clone());
        config.insecure = source.insecure()?;
        Ok(config)
    }

    /// Overrides the per-request timeout
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.target.is_empty() {
            anyhow::bail!("source.target cannot be empty");
        }

        if !self.target.starts_with("http://") && !self.target.starts_with("https://") {
            anyhow::bail!("source.target must start with http:// or https://");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request timeout must be greater than 0");
        }

        Ok(())
    }

    /// Builds the HTTP client used to reach the CI server
    pub fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.request_timeout)
            .danger_accept_invalid_certs(self.insecure)
            .build()
    }
}
