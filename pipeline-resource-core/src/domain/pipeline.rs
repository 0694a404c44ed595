//! Pipeline domain types

use serde::{Deserialize, Serialize};

/// A pipeline as listed by the CI server for a team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    pub name: String,
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub paused: bool,
    #[serde(default)]
    pub public: bool,
}

/// A pipeline's configuration together with its server-assigned version
///
/// Only `version` feeds the out step's response; `config` and `raw_config`
/// are kept so callers can inspect what the server holds.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Parsed `config` field of the server response
    pub config: serde_json::Value,
    /// Response body exactly as the server sent it
    pub raw_config: String,
    /// Opaque revision identifier for the configuration
    pub version: String,
}
