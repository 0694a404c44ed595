//! Out command
//!
//! Reconciles the declared pipelines against the CI server, then reports a
//! version for every pipeline the server currently holds for the primary
//! team.
//!
//! Declarations are handled strictly in input order and the first failure
//! ends the run: nothing after it is attempted and no response is produced.
//! Mutations already applied stay applied.

use pipeline_resource_client::PipelineApi;
use pipeline_resource_core::InputError;
use pipeline_resource_core::dto::out::{OutRequest, OutResponse, PipelineDeclaration, VersionMap};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::OutError;
use crate::service::{PipelineDeleter, PipelineSetter, PipelineUnpauser};
use crate::template::TemplateVariables;

pub struct OutCommand {
    api: Arc<dyn PipelineApi>,
    setter: Arc<dyn PipelineSetter>,
    unpauser: Arc<dyn PipelineUnpauser>,
    deleter: Arc<dyn PipelineDeleter>,
    sources_dir: PathBuf,
}

impl OutCommand {
    pub fn new(
        api: Arc<dyn PipelineApi>,
        setter: Arc<dyn PipelineSetter>,
        unpauser: Arc<dyn PipelineUnpauser>,
        deleter: Arc<dyn PipelineDeleter>,
        sources_dir: PathBuf,
    ) -> Self {
        Self {
            api,
            setter,
            unpauser,
            deleter,
            sources_dir,
        }
    }

    /// Run one out step
    pub async fn run(&self, request: &OutRequest) -> Result<OutResponse, OutError> {
        let team_name = &request.source.primary_team()?.name;
        let pipelines = &request.params.pipelines;

        debug!("Input pipelines: {:?}", pipelines);
        info!("Setting {} pipeline(s)", pipelines.len());

        // Parsed on first use; an invalid value only matters once a pipeline reaches unpausing.
        let mut unpause: Option<bool> = None;

        for pipeline in pipelines {
            if !pipeline.present()? {
                debug!("Deleting pipeline: {}/{}", pipeline.team_name, pipeline.name);
                self.deleter
                    .delete_pipeline(&pipeline.team_name, &pipeline.name)
                    .await?;
                continue;
            }

            self.set_pipeline(pipeline).await?;

            let should_unpause = match unpause {
                Some(value) => value,
                None => {
                    let value = request.params.unpause()?;
                    unpause = Some(value);
                    value
                }
            };
            if should_unpause {
                debug!("Unpausing pipeline: {}/{}", pipeline.team_name, pipeline.name);
                self.unpauser
                    .unpause_pipeline(&pipeline.team_name, &pipeline.name)
                    .await?;
            }
        }
        info!("Setting pipelines complete");

        let version = self.collect_versions(team_name).await?;

        Ok(OutResponse {
            version,
            metadata: Vec::new(),
        })
    }

    async fn set_pipeline(&self, pipeline: &PipelineDeclaration) -> Result<(), OutError> {
        if pipeline.config_file.is_empty() {
            return Err(InputError::MissingField("config").into());
        }

        let config_path = self.source_path(&pipeline.config_file);
        let vars_files: Vec<PathBuf> = pipeline
            .vars_files
            .iter()
            .map(|file| self.source_path(file))
            .collect();
        let variables = TemplateVariables::from(pipeline.vars.clone());

        debug!(
            "Setting pipeline: {}/{} from {}",
            pipeline.team_name,
            pipeline.name,
            config_path.display()
        );
        self.setter
            .set_pipeline(
                &pipeline.team_name,
                &pipeline.name,
                &config_path,
                &variables,
                &vars_files,
            )
            .await
    }

    /// Resolve a declared path under the sources directory
    ///
    /// Root and prefix components are dropped, so `/c.yml` and `c.yml` name
    /// the same file.
    fn source_path(&self, path: &str) -> PathBuf {
        let relative: PathBuf = Path::new(path)
            .components()
            .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
            .collect();
        self.sources_dir.join(relative)
    }

    /// Version of every pipeline the server lists for the team, keyed by name
    async fn collect_versions(&self, team_name: &str) -> Result<VersionMap, OutError> {
        debug!("Getting pipelines for team {}", team_name);
        let server_pipelines = self.api.list_pipelines(team_name).await?;
        debug!("Found {} pipeline(s)", server_pipelines.len());

        let mut versions = VersionMap::new();
        for pipeline in server_pipelines {
            debug!("Getting pipeline: {}", pipeline.name);
            let config = self.api.pipeline_config(team_name, &pipeline.name).await?;
            versions.insert(pipeline.name, config.version);
        }

        Ok(versions)
    }
}
