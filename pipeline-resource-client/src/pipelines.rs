//! Pipeline-related API endpoints

use pipeline_resource_core::domain::pipeline::{Pipeline, PipelineConfig};
use reqwest::{Method, StatusCode, header};

use crate::ConcourseClient;
use crate::error::{ClientError, Result};

/// Header carrying a pipeline configuration's version, on reads and writes
pub const CONFIG_VERSION_HEADER: &str = "X-Concourse-Config-Version";

impl ConcourseClient {
    // =============================================================================
    // Pipeline Queries
    // =============================================================================

    /// List all pipelines of a team
    ///
    /// # Arguments
    /// * `team_name` - The team whose pipelines are listed
    ///
    /// # Returns
    /// The pipelines in the order the server returns them
    pub async fn list_pipelines(&self, team_name: &str) -> Result<Vec<Pipeline>> {
        let url = self.team_url(team_name, &["pipelines"])?;
        let response = self.team_request(Method::GET, team_name, url).send().await?;

        self.handle_response(response).await
    }

    /// Fetch a pipeline's configuration and version
    ///
    /// # Arguments
    /// * `team_name` - The owning team
    /// * `pipeline_name` - The pipeline name
    ///
    /// # Returns
    /// The parsed config, the raw response body and the config version
    pub async fn pipeline_config(
        &self,
        team_name: &str,
        pipeline_name: &str,
    ) -> Result<PipelineConfig> {
        let url = self.team_url(team_name, &["pipelines", pipeline_name, "config"])?;
        let response = self.team_request(Method::GET, team_name, url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(not_found(team_name, pipeline_name));
        }
        let response = self.check_status(response).await?;

        let version = response
            .headers()
            .get(CONFIG_VERSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| {
                ClientError::InvalidResponse(format!("missing {} header", CONFIG_VERSION_HEADER))
            })?;

        let raw_config = response.text().await?;
        let body: serde_json::Value = serde_json::from_str(&raw_config).map_err(|e| {
            ClientError::InvalidResponse(format!("Failed to parse pipeline config: {}", e))
        })?;
        let config = body.get("config").cloned().unwrap_or(serde_json::Value::Null);

        Ok(PipelineConfig {
            config,
            raw_config,
            version,
        })
    }

    // =============================================================================
    // Pipeline Mutations
    // =============================================================================

    /// Create or update a pipeline's configuration
    ///
    /// # Arguments
    /// * `team_name` - The owning team
    /// * `pipeline_name` - The pipeline name
    /// * `config_version` - Current version when updating, `None` when creating
    /// * `config` - The YAML configuration document
    pub async fn set_pipeline_config(
        &self,
        team_name: &str,
        pipeline_name: &str,
        config_version: Option<&str>,
        config: String,
    ) -> Result<()> {
        let url = self.team_url(team_name, &["pipelines", pipeline_name, "config"])?;
        let mut request = self
            .team_request(Method::PUT, team_name, url)
            .header(header::CONTENT_TYPE, "application/x-yaml")
            .body(config);
        if let Some(version) = config_version {
            request = request.header(CONFIG_VERSION_HEADER, version);
        }
        let response = request.send().await?;

        self.handle_empty_response(response).await
    }

    /// Unpause a pipeline
    pub async fn unpause_pipeline(&self, team_name: &str, pipeline_name: &str) -> Result<()> {
        let url = self.team_url(team_name, &["pipelines", pipeline_name, "unpause"])?;
        let response = self.team_request(Method::PUT, team_name, url).send().await?;

        self.handle_empty_response(response).await
    }

    /// Delete a pipeline
    ///
    /// A 404 is reported as [`ClientError::NotFound`] so callers can treat
    /// deletion of an absent pipeline as done.
    pub async fn delete_pipeline(&self, team_name: &str, pipeline_name: &str) -> Result<()> {
        let url = self.team_url(team_name, &["pipelines", pipeline_name])?;
        let response = self.team_request(Method::DELETE, team_name, url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(not_found(team_name, pipeline_name));
        }

        self.handle_empty_response(response).await
    }
}

fn not_found(team_name: &str, pipeline_name: &str) -> ClientError {
    ClientError::NotFound(format!("Pipeline not found: {}/{}", team_name, pipeline_name))
}
