//! Generation orchestration - drives one run per configured scope

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};

use crate::core::config::{GeneratorConfig, ScopeConfig};
use crate::core::error::{GeneratorError, Result};
use crate::generation::curator::ParameterCurator;
use crate::generation::endpoint_emitter::{EndpointEmitter, EndpointInput};
use crate::generation::manifest::{ManifestBuilder, checksum};
use crate::generation::namespace_emitter::{NAMESPACE_TEMPLATE, NamespaceEmitter};
use crate::generation::namespaces::{
    namespaces_from_spec, operation_namespace, prune_empty_namespaces,
};
use crate::generation::renames::RenameMapping;
use crate::generation::rules::{ConvenienceRules, DEFAULT_TEMPLATE};
use crate::generation::{
    HttpMethod, Namespace, OpenApiLoader, OutputService, ReferenceTable, ScopeContext,
};
use crate::infrastructure::templates::TemplateRegistry;

/// What one scope run produced
#[derive(Debug, Clone)]
pub struct ScopeSummary {
    pub scope: String,
    pub checksum: String,
    pub namespace_files: Vec<PathBuf>,
    pub endpoints: usize,
    pub manifest_path: PathBuf,
}

/// Orchestrates the code generation workflow
pub struct GenerationOrchestrator {
    config: GeneratorConfig,
    loader: Arc<dyn OpenApiLoader>,
    output: Arc<dyn OutputService>,
    templates: TemplateRegistry,
    renames: RenameMapping,
    rules: ConvenienceRules,
}

impl GenerationOrchestrator {
    /// Create an orchestrator, failing if a template the run needs is missing
    pub fn new(
        config: GeneratorConfig,
        loader: Arc<dyn OpenApiLoader>,
        output: Arc<dyn OutputService>,
        templates: TemplateRegistry,
        renames: RenameMapping,
    ) -> Result<Self> {
        templates.ensure(
            [NAMESPACE_TEMPLATE, DEFAULT_TEMPLATE]
                .into_iter()
                .chain(renames.templates()),
        )?;

        Ok(Self {
            config,
            loader,
            output,
            templates,
            renames,
            rules: ConvenienceRules::default(),
        })
    }

    /// Load templates and renames named by the configuration, then build
    pub async fn from_config(
        config: GeneratorConfig,
        loader: Arc<dyn OpenApiLoader>,
        output: Arc<dyn OutputService>,
    ) -> Result<Self> {
        let templates = TemplateRegistry::load(config.template_dir.as_deref()).await?;
        let renames = match &config.rename_mapping {
            Some(path) => RenameMapping::load(path).await?,
            None => RenameMapping::empty(),
        };
        debug!(renames = renames.len(), templates = ?templates.names(), "Generator ready");
        Self::new(config, loader, output, templates, renames)
    }

    /// Replace the convenience substitution table
    pub fn with_rules(mut self, rules: ConvenienceRules) -> Self {
        self.rules = rules;
        self
    }

    /// Run every configured scope, one after another
    pub async fn generate_all(&self) -> Result<Vec<ScopeSummary>> {
        let mut summaries = Vec::with_capacity(self.config.scopes.len());
        for scope in &self.config.scopes {
            summaries.push(self.generate_scope(scope).await?);
        }
        Ok(summaries)
    }

    /// Fetch, resolve and emit a single scope
    pub async fn generate_scope(&self, scope: &ScopeConfig) -> Result<ScopeSummary> {
        info!(scope = %scope.name, source = %scope.spec_url, "Generating scope");

        let spec = self.loader.load(&scope.spec_url).await?;
        let checksum = checksum(&spec)?;
        let spec_version = spec
            .get("info")
            .and_then(|info| info.get("version"))
            .and_then(JsonValue::as_str)
            .unwrap_or_else(|| {
                warn!(scope = %scope.name, "spec has no info.version");
                ""
            });
        let paths = spec
            .get("paths")
            .and_then(JsonValue::as_object)
            .ok_or_else(|| GeneratorError::invalid_document("document has no paths object"))?;

        let namespaces = prune_empty_namespaces(&namespaces_from_spec(&spec)?, paths);
        let references = ReferenceTable::resolve(&spec);
        let context = ScopeContext::new(&self.config, scope, spec_version);
        let mut manifest =
            ManifestBuilder::new(&scope.name, spec_version, &checksum, &scope.base_url);

        self.output.ensure_directory(&context.output_dir).await?;

        let namespace_emitter = NamespaceEmitter::new(&self.templates, self.output.as_ref());
        let mut namespace_files = Vec::with_capacity(namespaces.len());
        for (i, namespace) in namespaces.iter().enumerate() {
            info!(
                "[{:>2}/{}] creating {}",
                i + 1,
                namespaces.len(),
                namespace.display_name
            );
            namespace_files.push(namespace_emitter.emit(&context, namespace).await?);
        }

        let by_name: HashMap<&str, &Namespace> =
            namespaces.iter().map(|n| (n.name.as_str(), n)).collect();
        let curator = ParameterCurator::new(&references, &self.rules);
        let endpoint_emitter =
            EndpointEmitter::new(&self.templates, self.output.as_ref(), &curator, &self.renames);

        for (path, item) in paths {
            let path_parameters = item
                .get("parameters")
                .and_then(JsonValue::as_array)
                .map(Vec::as_slice)
                .unwrap_or(&[]);

            for method in HttpMethod::all() {
                let Some(operation) = item.get(method.as_str()) else {
                    continue;
                };
                let Some(namespace) =
                    operation_namespace(operation).and_then(|t| by_name.get(t).copied())
                else {
                    debug!(path = %path, method = %method, "skipping operation outside known namespaces");
                    continue;
                };

                let input = EndpointInput {
                    namespace,
                    path,
                    method: *method,
                    operation,
                    path_parameters,
                };
                endpoint_emitter.emit(&context, &input, &mut manifest).await?;
            }
        }

        let manifest = manifest.build();
        let manifest_path = context.manifest_file();
        self.output
            .write_fresh(&manifest_path, &manifest.to_json_pretty()?)
            .await?;

        info!(
            scope = %scope.name,
            namespaces = namespaces.len(),
            endpoints = manifest.endpoints.len(),
            manifest = %manifest_path.display(),
            "Scope generated"
        );

        Ok(ScopeSummary {
            scope: scope.name.clone(),
            checksum,
            namespace_files,
            endpoints: manifest.endpoints.len(),
            manifest_path,
        })
    }
}
