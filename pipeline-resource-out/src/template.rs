//! Template variables
//!
//! Pipeline configs may contain `{{name}}` placeholders. Values come from
//! YAML vars files and from the declaration's inline `vars`; each known
//! placeholder is replaced by the JSON encoding of its value, so strings end
//! up quoted. Placeholders without a value are left as they are, and
//! substituted values are never expanded again.

use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::{OutError, io_err};

static PLACEHOLDER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([-\w\p{L}]+)\}\}").unwrap());

/// Variables available to a pipeline config
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateVariables(BTreeMap<String, serde_json::Value>);

impl TemplateVariables {
    /// Loads a YAML vars file; an empty file yields no variables
    pub async fn load_file(path: &Path) -> Result<Self, OutError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| io_err(path, e))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let vars = serde_yaml::from_str(&content).map_err(|source| OutError::VarsFile {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self(vars))
    }

    /// Loads vars files in order, later files overriding earlier ones
    pub async fn load_files(paths: &[impl AsRef<Path>]) -> Result<Self, OutError> {
        let mut variables = Self::default();
        for path in paths {
            variables.merge(Self::load_file(path.as_ref()).await?);
        }
        Ok(variables)
    }

    /// Overlays `other` on top of these variables
    pub fn merge(&mut self, other: TemplateVariables) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Substitutes every known `{{name}}` placeholder in `content` in one pass
    pub fn evaluate(&self, content: &str) -> String {
        PLACEHOLDER_PATTERN
            .replace_all(content, |caps: &Captures| match self.0.get(&caps[1]) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}

impl From<BTreeMap<String, serde_json::Value>> for TemplateVariables {
    fn from(vars: BTreeMap<String, serde_json::Value>) -> Self {
        Self(vars)
    }
}
