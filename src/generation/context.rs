//! Generation context - per-scope settings that flow through every emitter

use std::path::PathBuf;

use crate::core::config::{GeneratorConfig, ScopeConfig};
use crate::generation::Namespace;
use crate::generation::utils::sanitize_filename;

/// Everything an emitter needs to know about the scope being generated
#[derive(Debug, Clone)]
pub struct ScopeContext {
    pub scope: String,
    /// `info.version` of the specification document
    pub spec_version: String,
    pub base_url: String,
    pub docs_base_url: String,
    pub runtime_path: String,
    pub output_dir: PathBuf,
    pub file_extension: String,
}

impl ScopeContext {
    pub fn new(
        config: &GeneratorConfig,
        scope: &ScopeConfig,
        spec_version: impl Into<String>,
    ) -> Self {
        Self {
            scope: scope.name.clone(),
            spec_version: spec_version.into(),
            base_url: scope.base_url.clone(),
            docs_base_url: config.docs_base_url.clone(),
            runtime_path: config.runtime_path.clone(),
            output_dir: config.output_dir.clone(),
            file_extension: config.file_extension.clone(),
        }
    }

    /// `{output_dir}/{lowercase name, spaces as _}.{extension}`
    pub fn namespace_file(&self, namespace: &Namespace) -> PathBuf {
        self.output_dir.join(format!(
            "{}.{}",
            sanitize_filename(&namespace.name),
            self.file_extension
        ))
    }

    /// `{output_dir}/{scope}.json`
    pub fn manifest_file(&self) -> PathBuf {
        self.output_dir.join(format!("{}.json", self.scope))
    }
}
