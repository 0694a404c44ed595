//! Pipeline configuration setting
//!
//! Renders a config file with its template variables and uploads it,
//! creating the pipeline when the server does not know it yet.

use async_trait::async_trait;
use pipeline_resource_client::PipelineApi;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::error::{OutError, io_err};
use crate::template::TemplateVariables;

/// Applies a config file to a named pipeline
#[async_trait]
pub trait PipelineSetter: Send + Sync {
    /// Creates or updates a pipeline
    ///
    /// # Arguments
    /// * `team_name` - The owning team
    /// * `pipeline_name` - The pipeline name
    /// * `config_path` - Absolute path of the config file
    /// * `template_variables` - Variables that take precedence over the vars files
    /// * `vars_files` - Absolute paths of YAML vars files, lowest precedence first
    async fn set_pipeline(
        &self,
        team_name: &str,
        pipeline_name: &str,
        config_path: &Path,
        template_variables: &TemplateVariables,
        vars_files: &[PathBuf],
    ) -> Result<(), OutError>;
}

/// Setter that templates the config locally and uploads it through the client
pub struct ConfigPipelineSetter {
    api: Arc<dyn PipelineApi>,
}

impl ConfigPipelineSetter {
    pub fn new(api: Arc<dyn PipelineApi>) -> Self {
        Self { api }
    }

    /// Version of the server's current config, or `None` for a new pipeline
    async fn current_version(
        &self,
        team_name: &str,
        pipeline_name: &str,
    ) -> Result<Option<String>, OutError> {
        match self.api.pipeline_config(team_name, pipeline_name).await {
            Ok(config) => Ok(Some(config.version)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl PipelineSetter for ConfigPipelineSetter {
    async fn set_pipeline(
        &self,
        team_name: &str,
        pipeline_name: &str,
        config_path: &Path,
        template_variables: &TemplateVariables,
        vars_files: &[PathBuf],
    ) -> Result<(), OutError> {
        let content = tokio::fs::read_to_string(config_path)
            .await
            .map_err(|e| io_err(config_path, e))?;

        let mut variables = TemplateVariables::load_files(vars_files).await?;
        variables.merge(template_variables.clone());
        if !variables.is_empty() {
            debug!("Rendering {} with template variables", config_path.display());
        }
        let config = variables.evaluate(&content);

        let version = self.current_version(team_name, pipeline_name).await?;
        debug!(
            "Uploading config for {}/{} (current version: {})",
            team_name,
            pipeline_name,
            version.as_deref().unwrap_or("none")
        );

        self.api
            .set_pipeline_config(team_name, pipeline_name, version.as_deref(), config)
            .await?;

        Ok(())
    }
}
