//! Out step DTOs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::InputError;
use crate::flag::{self, parse_flag};

/// Pipeline name to configuration version, rebuilt from server state every run
pub type VersionMap = BTreeMap<String, String>;

/// The single input document of an out run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutRequest {
    pub source: Source,
    #[serde(default)]
    pub params: OutParams,
}

/// Resource-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Source {
    /// Base URL of the CI server
    #[serde(default)]
    pub target: String,
    /// Skip TLS verification when talking to the CI server
    #[serde(default, deserialize_with = "flag::deserialize")]
    pub insecure: Option<String>,
    #[serde(default)]
    pub teams: Vec<Team>,
}

impl Source {
    /// The team whose pipelines are reported in the response
    ///
    /// Only the first configured team is consulted, and it must be named.
    pub fn primary_team(&self) -> Result<&Team, InputError> {
        let team = self.teams.first().ok_or(InputError::MissingTeam)?;
        if team.name.is_empty() {
            return Err(InputError::MissingField("source.teams[0].name"));
        }
        Ok(team)
    }

    /// Resolve the `insecure` flag, defaulting to false
    pub fn insecure(&self) -> Result<bool, InputError> {
        parse_flag("insecure", self.insecure.as_deref(), false)
    }
}

/// A team on the CI server, with optional basic-auth credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
}

/// Step parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutParams {
    #[serde(default)]
    pub pipelines: Vec<PipelineDeclaration>,
    #[serde(default, deserialize_with = "flag::deserialize")]
    pub unpause: Option<String>,
}

impl OutParams {
    /// Resolve the request-wide `unpause` flag, defaulting to false
    pub fn unpause(&self) -> Result<bool, InputError> {
        parse_flag("unpause", self.unpause.as_deref(), false)
    }
}

/// One entry of the desired pipeline state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineDeclaration {
    #[serde(alias = "team")]
    pub team_name: String,
    pub name: String,
    /// Config file path, relative to the sources directory
    #[serde(default, rename = "config", alias = "config_file")]
    pub config_file: String,
    /// Vars file paths, relative to the sources directory
    #[serde(default)]
    pub vars_files: Vec<String>,
    /// Template variables applied on top of the vars files
    #[serde(default)]
    pub vars: BTreeMap<String, serde_json::Value>,
    #[serde(default, deserialize_with = "flag::deserialize")]
    pub present: Option<String>,
}

impl PipelineDeclaration {
    /// Resolve the `present` flag, defaulting to true
    pub fn present(&self) -> Result<bool, InputError> {
        parse_flag("present", self.present.as_deref(), true)
    }
}

/// The single output document of an out run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutResponse {
    pub version: VersionMap,
    pub metadata: Vec<Metadata>,
}

/// A name/value pair shown alongside a version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub name: String,
    pub value: String,
}
