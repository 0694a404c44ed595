//! In-memory fakes shared by the unit tests

use async_trait::async_trait;
use pipeline_resource_client::{ClientError, PipelineApi, Result};
use pipeline_resource_core::domain::pipeline::{Pipeline, PipelineConfig};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::OutError;
use crate::service::{PipelineDeleter, PipelineSetter, PipelineUnpauser};
use crate::template::TemplateVariables;

/// Builds the error a fake returns; plain fn so fakes stay `Send + Sync`
pub type ErrorFn = fn() -> ClientError;

/// Ordered record of every call made against the fakes
pub type CallLog = Arc<Mutex<Vec<Call>>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List {
        team: String,
    },
    FetchConfig {
        team: String,
        name: String,
    },
    SetConfig {
        team: String,
        name: String,
        version: Option<String>,
        config: String,
    },
    Set {
        team: String,
        name: String,
        config_path: PathBuf,
        vars_files: Vec<PathBuf>,
    },
    Unpause {
        team: String,
        name: String,
    },
    Delete {
        team: String,
        name: String,
    },
}

impl Call {
    pub fn list(team: &str) -> Self {
        Call::List { team: team.into() }
    }

    pub fn fetch_config(team: &str, name: &str) -> Self {
        Call::FetchConfig {
            team: team.into(),
            name: name.into(),
        }
    }

    pub fn set_config(team: &str, name: &str, version: Option<&str>, config: &str) -> Self {
        Call::SetConfig {
            team: team.into(),
            name: name.into(),
            version: version.map(Into::into),
            config: config.into(),
        }
    }

    pub fn set(
        team: &str,
        name: &str,
        config_path: impl Into<PathBuf>,
        vars_files: &[&str],
    ) -> Self {
        Call::Set {
            team: team.into(),
            name: name.into(),
            config_path: config_path.into(),
            vars_files: vars_files.iter().map(PathBuf::from).collect(),
        }
    }

    pub fn unpause(team: &str, name: &str) -> Self {
        Call::Unpause {
            team: team.into(),
            name: name.into(),
        }
    }

    pub fn delete(team: &str, name: &str) -> Self {
        Call::Delete {
            team: team.into(),
            name: name.into(),
        }
    }
}

// =============================================================================
// Fake CI server
// =============================================================================

/// A CI server holding `(name, version)` pairs in listing order
///
/// Setting a config bumps a numeric version (new pipelines start at "1");
/// deleting an unknown pipeline fails with a not-found error.
#[derive(Default)]
pub struct FakeApi {
    log: CallLog,
    pipelines: Mutex<Vec<(String, String)>>,
    fail_list: Option<ErrorFn>,
    fail_config: Option<(String, ErrorFn)>,
    fail_set: Option<ErrorFn>,
    fail_unpause: Option<ErrorFn>,
    fail_delete: Option<ErrorFn>,
}

impl FakeApi {
    pub fn with_log(log: CallLog) -> Self {
        Self {
            log,
            ..Default::default()
        }
    }

    pub fn with_pipeline(self, name: &str, version: &str) -> Self {
        self.pipelines
            .lock()
            .unwrap()
            .push((name.to_string(), version.to_string()));
        self
    }

    pub fn failing_list(mut self, error: ErrorFn) -> Self {
        self.fail_list = Some(error);
        self
    }

    pub fn failing_config(mut self, name: &str, error: ErrorFn) -> Self {
        self.fail_config = Some((name.to_string(), error));
        self
    }

    pub fn failing_set(mut self, error: ErrorFn) -> Self {
        self.fail_set = Some(error);
        self
    }

    pub fn failing_unpause(mut self, error: ErrorFn) -> Self {
        self.fail_unpause = Some(error);
        self
    }

    pub fn failing_delete(mut self, error: ErrorFn) -> Self {
        self.fail_delete = Some(error);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.lock().unwrap().clone()
    }

    pub fn versions(&self) -> Vec<(String, String)> {
        self.pipelines.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.log.lock().unwrap().push(call);
    }
}

fn fail(error: Option<ErrorFn>) -> Result<()> {
    match error {
        Some(make) => Err(make()),
        None => Ok(()),
    }
}

#[async_trait]
impl PipelineApi for FakeApi {
    async fn list_pipelines(&self, team_name: &str) -> Result<Vec<Pipeline>> {
        self.record(Call::list(team_name));
        fail(self.fail_list)?;

        Ok(self
            .versions()
            .into_iter()
            .map(|(name, _)| Pipeline {
                name,
                team_name: team_name.to_string(),
                paused: false,
                public: false,
            })
            .collect())
    }

    async fn pipeline_config(
        &self,
        team_name: &str,
        pipeline_name: &str,
    ) -> Result<PipelineConfig> {
        self.record(Call::fetch_config(team_name, pipeline_name));
        if let Some((name, make)) = &self.fail_config {
            if name == pipeline_name {
                return Err(make());
            }
        }

        self.versions()
            .into_iter()
            .find(|(name, _)| name == pipeline_name)
            .map(|(_, version)| PipelineConfig {
                config: serde_json::json!({ "jobs": [] }),
                raw_config: r#"{"config":{"jobs":[]}}"#.to_string(),
                version,
            })
            .ok_or_else(|| {
                ClientError::NotFound(format!(
                    "Pipeline not found: {}/{}",
                    team_name, pipeline_name
                ))
            })
    }

    async fn set_pipeline_config(
        &self,
        team_name: &str,
        pipeline_name: &str,
        config_version: Option<&str>,
        config: String,
    ) -> Result<()> {
        self.record(Call::set_config(team_name, pipeline_name, config_version, &config));
        fail(self.fail_set)?;

        let mut pipelines = self.pipelines.lock().unwrap();
        match pipelines.iter_mut().find(|(name, _)| name == pipeline_name) {
            Some((_, version)) => {
                *version = (version.parse::<u64>().unwrap_or(0) + 1).to_string();
            }
            None => pipelines.push((pipeline_name.to_string(), "1".to_string())),
        }
        Ok(())
    }

    async fn unpause_pipeline(&self, team_name: &str, pipeline_name: &str) -> Result<()> {
        self.record(Call::unpause(team_name, pipeline_name));
        fail(self.fail_unpause)
    }

    async fn delete_pipeline(&self, team_name: &str, pipeline_name: &str) -> Result<()> {
        self.record(Call::delete(team_name, pipeline_name));
        fail(self.fail_delete)?;

        let mut pipelines = self.pipelines.lock().unwrap();
        let before = pipelines.len();
        pipelines.retain(|(name, _)| name != pipeline_name);
        if pipelines.len() == before {
            return Err(ClientError::NotFound(format!(
                "Pipeline not found: {}/{}",
                team_name, pipeline_name
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Recording adapters
// =============================================================================

/// Records setter, unpauser and deleter calls into a shared log,
/// failing for one chosen pipeline name per operation
#[derive(Default, Clone)]
pub struct RecordingAdapters {
    pub log: CallLog,
    fail_set: Option<(&'static str, ErrorFn)>,
    fail_unpause: Option<(&'static str, ErrorFn)>,
    fail_delete: Option<(&'static str, ErrorFn)>,
}

impl RecordingAdapters {
    pub fn failing_set(mut self, name: &'static str, error: ErrorFn) -> Self {
        self.fail_set = Some((name, error));
        self
    }

    pub fn failing_unpause(mut self, name: &'static str, error: ErrorFn) -> Self {
        self.fail_unpause = Some((name, error));
        self
    }

    pub fn failing_delete(mut self, name: &'static str, error: ErrorFn) -> Self {
        self.fail_delete = Some((name, error));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.log.lock().unwrap().push(call);
    }
}

fn fail_for(target: Option<(&'static str, ErrorFn)>, pipeline_name: &str) -> Result<()> {
    match target {
        Some((name, make)) if name == pipeline_name => Err(make()),
        _ => Ok(()),
    }
}

#[async_trait]
impl PipelineSetter for RecordingAdapters {
    async fn set_pipeline(
        &self,
        team_name: &str,
        pipeline_name: &str,
        config_path: &Path,
        _template_variables: &TemplateVariables,
        vars_files: &[PathBuf],
    ) -> std::result::Result<(), OutError> {
        self.record(Call::Set {
            team: team_name.into(),
            name: pipeline_name.into(),
            config_path: config_path.to_path_buf(),
            vars_files: vars_files.to_vec(),
        });
        fail_for(self.fail_set, pipeline_name)?;
        Ok(())
    }
}

#[async_trait]
impl PipelineUnpauser for RecordingAdapters {
    async fn unpause_pipeline(&self, team_name: &str, pipeline_name: &str) -> Result<()> {
        self.record(Call::unpause(team_name, pipeline_name));
        fail_for(self.fail_unpause, pipeline_name)
    }
}

#[async_trait]
impl PipelineDeleter for RecordingAdapters {
    async fn delete_pipeline(&self, team_name: &str, pipeline_name: &str) -> Result<()> {
        self.record(Call::delete(team_name, pipeline_name));
        fail_for(self.fail_delete, pipeline_name)
    }
}
