//! Pipeline Resource HTTP Client
//!
//! A small, type-safe HTTP client for the CI server's pipeline API.
//!
//! The out step only needs five operations (list, fetch config, set config,
//! unpause, delete); they are exposed both as inherent methods on
//! [`ConcourseClient`] and through the [`PipelineApi`] trait so callers can
//! substitute their own implementation.
//!
//! # Example
//!
//! ```no_run
//! use pipeline_resource_client::ConcourseClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), pipeline_resource_client::ClientError> {
//!     let client = ConcourseClient::new("http://localhost:8080");
//!
//!     for pipeline in client.list_pipelines("main").await? {
//!         println!("{}", pipeline.name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod error;
mod pipelines;

// Re-export commonly used types
pub use api::PipelineApi;
pub use error::{ClientError, Result};
pub use pipelines::CONFIG_VERSION_HEADER;

use pipeline_resource_core::dto::out::Team;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// HTTP client for the CI server API
#[derive(Debug, Clone)]
pub struct ConcourseClient {
    /// Base URL of the CI server (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// Basic-auth credentials keyed by team name
    credentials: HashMap<String, Credentials>,
}

#[derive(Debug, Clone)]
struct Credentials {
    username: String,
    password: Option<String>,
}

impl ConcourseClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the CI server (e.g., "http://localhost:8080")
    ///
    /// # Example
    /// ```
    /// use pipeline_resource_client::ConcourseClient;
    ///
    /// let client = ConcourseClient::new("http://localhost:8080");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, TLS settings, etc.
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the CI server
    /// * `client` - A configured reqwest Client
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            credentials: HashMap::new(),
        }
    }

    /// Attach basic-auth credentials for every team that carries a username
    pub fn with_credentials(mut self, teams: &[Team]) -> Self {
        for team in teams {
            if let Some(username) = &team.username {
                self.credentials.insert(
                    team.name.clone(),
                    Credentials {
                        username: username.clone(),
                        password: team.password.clone(),
                    },
                );
            }
        }
        self
    }

    /// Get the base URL of the CI server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Request Builders
    // =============================================================================

    /// Build `{base}/api/v1/teams/{team}/{segments...}` with each segment escaped
    fn team_url(&self, team_name: &str, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ClientError::InvalidTarget(format!("{}: {}", self.base_url, e))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                ClientError::InvalidTarget(format!("{} cannot be a base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(["api", "v1", "teams", team_name])
            .extend(segments);

        Ok(url)
    }

    /// Start a request scoped to a team, authenticated when credentials exist
    fn team_request(&self, method: Method, team_name: &str, url: Url) -> RequestBuilder {
        tracing::debug!("{} {}", method, url);

        let builder = self.client.request(method, url);
        match self.credentials.get(team_name) {
            Some(creds) => builder.basic_auth(&creds.username, creds.password.as_deref()),
            None => builder,
        }
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let response = self.check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| {
                ClientError::InvalidResponse(format!("Failed to parse JSON response: {}", e))
            })
    }

    /// Handle an API response that returns no content
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        self.check_status(response).await.map(|_| ())
    }

    /// Turn a non-2xx response into [`ClientError::Api`] carrying the body text
    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(response)
    }
}
