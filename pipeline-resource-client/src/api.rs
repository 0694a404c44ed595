//! Pipeline API abstraction
//!
//! The out step talks to the CI server only through this trait, which keeps
//! the reconciliation logic testable without a live server.

use async_trait::async_trait;
use pipeline_resource_core::domain::pipeline::{Pipeline, PipelineConfig};

use crate::ConcourseClient;
use crate::error::Result;

/// Pipeline operations the out step needs from the CI server
#[async_trait]
pub trait PipelineApi: Send + Sync {
    /// List every pipeline the server knows for a team, in server order
    async fn list_pipelines(&self, team_name: &str) -> Result<Vec<Pipeline>>;

    /// Fetch a pipeline's configuration and its current version
    async fn pipeline_config(&self, team_name: &str, pipeline_name: &str)
    -> Result<PipelineConfig>;

    /// Create or update a pipeline's configuration
    ///
    /// `config_version` must be the version last fetched when updating an
    /// existing pipeline, and `None` when creating one.
    async fn set_pipeline_config(
        &self,
        team_name: &str,
        pipeline_name: &str,
        config_version: Option<&str>,
        config: String,
    ) -> Result<()>;

    /// Unpause a pipeline
    async fn unpause_pipeline(&self, team_name: &str, pipeline_name: &str) -> Result<()>;

    /// Delete a pipeline; a missing pipeline yields [`crate::ClientError::NotFound`]
    async fn delete_pipeline(&self, team_name: &str, pipeline_name: &str) -> Result<()>;
}

#[async_trait]
impl PipelineApi for ConcourseClient {
    async fn list_pipelines(&self, team_name: &str) -> Result<Vec<Pipeline>> {
        ConcourseClient::list_pipelines(self, team_name).await
    }

    async fn pipeline_config(
        &self,
        team_name: &str,
        pipeline_name: &str,
    ) -> Result<PipelineConfig> {
        ConcourseClient::pipeline_config(self, team_name, pipeline_name).await
    }

    async fn set_pipeline_config(
        &self,
        team_name: &str,
        pipeline_name: &str,
        config_version: Option<&str>,
        config: String,
    ) -> Result<()> {
        ConcourseClient::set_pipeline_config(self, team_name, pipeline_name, config_version, config)
            .await
    }

    async fn unpause_pipeline(&self, team_name: &str, pipeline_name: &str) -> Result<()> {
        ConcourseClient::unpause_pipeline(self, team_name, pipeline_name).await
    }

    async fn delete_pipeline(&self, team_name: &str, pipeline_name: &str) -> Result<()> {
        ConcourseClient::delete_pipeline(self, team_name, pipeline_name).await
    }
}
