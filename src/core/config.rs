//! Generator configuration.
//!
//! Values come from an optional TOML file; every field has a default so an
//! empty file (or no file at all) yields the stock two-scope setup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use crate::core::error::{GeneratorError, Result};

/// Default documentation base that endpoint docs slugs are appended to
pub const DEFAULT_DOCS_BASE_URL: &str = "https://xata.io/docs/api-reference";

/// Default import path of the client runtime in generated code
pub const DEFAULT_RUNTIME_PATH: &str = "apigen::client";

/// One API scope: where its spec lives and which host its clients talk to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeConfig {
    pub name: String,
    pub spec_url: String,
    pub base_url: String,
}

/// Top level generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Directory receiving namespace files and manifests
    pub output_dir: PathBuf,
    /// File extension of generated namespace files
    pub file_extension: String,
    /// Optional directory with `<name>.tera` templates overriding the built-ins
    pub template_dir: Option<PathBuf>,
    /// Optional JSON file with operation renames
    pub rename_mapping: Option<PathBuf>,
    pub docs_base_url: String,
    /// Module path generated code imports the client runtime from
    pub runtime_path: String,
    pub scopes: Vec<ScopeConfig>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("codegen/ws"),
            file_extension: String::from("rs"),
            template_dir: None,
            rename_mapping: None,
            docs_base_url: DEFAULT_DOCS_BASE_URL.to_string(),
            runtime_path: DEFAULT_RUNTIME_PATH.to_string(),
            scopes: vec![
                ScopeConfig {
                    name: "core".to_string(),
                    spec_url: "https://xata.io/api/openapi?scope=core".to_string(),
                    base_url: "https://api.xata.io".to_string(),
                },
                ScopeConfig {
                    name: "workspace".to_string(),
                    spec_url: "https://xata.io/api/openapi?scope=workspace".to_string(),
                    base_url: "https://{workspaceId}.{regionId}.xata.sh".to_string(),
                },
            ],
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read or isn't valid TOML.
    pub async fn load(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "Reading generator configuration");
        let content = fs::read_to_string(path).await.map_err(|e| {
            GeneratorError::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| GeneratorError::config(format!("Invalid configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Look up a scope by name.
    pub fn scope(&self, name: &str) -> Option<&ScopeConfig> {
        self.scopes.iter().find(|s| s.name == name)
    }

    /// Keep only the named scopes, in the order requested.
    pub fn select_scopes(&mut self, names: &[String]) -> Result<()> {
        if names.is_empty() {
            return Ok(());
        }
        let selected = names
            .iter()
            .map(|name| {
                self.scope(name).cloned().ok_or_else(|| {
                    GeneratorError::config(format!("Unknown scope '{name}'"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        self.scopes = selected;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.scopes.is_empty() {
            return Err(GeneratorError::config("At least one scope is required"));
        }
        for (i, scope) in self.scopes.iter().enumerate() {
            if scope.name.trim().is_empty() {
                return Err(GeneratorError::config("Scope name cannot be empty"));
            }
            if self.scopes[..i].iter().any(|s| s.name == scope.name) {
                return Err(GeneratorError::config(format!(
                    "Scope '{}' is declared twice",
                    scope.name
                )));
            }
        }
        Ok(())
    }
}
