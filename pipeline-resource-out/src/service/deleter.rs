//! Pipeline deletion
//!
//! Deleting a pipeline that does not exist counts as success, which makes
//! `present: false` safe to leave in place across runs.

use async_trait::async_trait;
use pipeline_resource_client::{PipelineApi, Result};
use std::sync::Arc;
use tracing::debug;

/// Message fragment the CI server uses when a pipeline is unknown
pub const PIPELINE_NOT_FOUND: &str = "Pipeline not found";

/// Deletes pipelines from the CI server
#[async_trait]
pub trait PipelineDeleter: Send + Sync {
    async fn delete_pipeline(&self, team_name: &str, pipeline_name: &str) -> Result<()>;
}

/// Idempotent deleter backed by the client
pub struct StandardPipelineDeleter {
    api: Arc<dyn PipelineApi>,
}

impl StandardPipelineDeleter {
    pub fn new(api: Arc<dyn PipelineApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PipelineDeleter for StandardPipelineDeleter {
    async fn delete_pipeline(&self, team_name: &str, pipeline_name: &str) -> Result<()> {
        match self.api.delete_pipeline(team_name, pipeline_name).await {
            Err(e) if e.is_not_found() || e.to_string().contains(PIPELINE_NOT_FOUND) => {
                debug!("Pipeline {}/{} already absent", team_name, pipeline_name);
                Ok(())
            }
            result => result,
        }
    }
}
