//! Pipeline unpausing

use async_trait::async_trait;
use pipeline_resource_client::{PipelineApi, Result};
use std::sync::Arc;

/// Unpauses pipelines on the CI server
#[async_trait]
pub trait PipelineUnpauser: Send + Sync {
    async fn unpause_pipeline(&self, team_name: &str, pipeline_name: &str) -> Result<()>;
}

/// Unpauser that forwards straight to the client; errors pass through untouched
pub struct StandardPipelineUnpauser {
    api: Arc<dyn PipelineApi>,
}

impl StandardPipelineUnpauser {
    pub fn new(api: Arc<dyn PipelineApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PipelineUnpauser for StandardPipelineUnpauser {
    async fn unpause_pipeline(&self, team_name: &str, pipeline_name: &str) -> Result<()> {
        self.api.unpause_pipeline(team_name, pipeline_name).await
    }
}
