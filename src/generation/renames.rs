//! Operation renames loaded from a JSON mapping file.
//!
//! Shape: `{ "<namespace file stem>": { "<operationId>": { "name": "...", "template": "..." } } }`

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use crate::core::error::{GeneratorError, Result};

/// Override of one operation's generated identifier and template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameEntry {
    pub name: String,
    #[serde(default = "default_template")]
    pub template: String,
}

fn default_template() -> String {
    crate::generation::rules::DEFAULT_TEMPLATE.to_string()
}

/// Read-only table of renames keyed by namespace then operation id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenameMapping(HashMap<String, HashMap<String, RenameEntry>>);

impl RenameMapping {
    pub fn empty() -> Self {
        Self::default()
    }

    pub async fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading rename mapping");
        let content = fs::read_to_string(path).await.map_err(|e| {
            GeneratorError::config(format!(
                "Failed to read rename mapping {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| GeneratorError::config(format!("Invalid rename mapping: {e}")))
    }

    pub fn lookup(&self, namespace: &str, operation_id: &str) -> Option<&RenameEntry> {
        self.0.get(namespace)?.get(operation_id)
    }

    /// Distinct template names referenced by any entry, sorted
    pub fn templates(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .0
            .values()
            .flat_map(|ops| ops.values())
            .map(|entry| entry.template.as_str())
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    pub fn len(&self) -> usize {
        self.0.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
