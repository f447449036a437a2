//! Renders the type declaration that opens each namespace file

use std::path::PathBuf;

use tera::Context;
use tracing::{info, warn};

use crate::core::error::Result;
use crate::generation::manifest::GENERATOR_VERSION;
use crate::generation::sanitizers::doc_lines;
use crate::generation::utils::type_name;
use crate::generation::{Namespace, OutputService, ScopeContext};
use crate::infrastructure::templates::TemplateRegistry;

/// Name of the template rendering namespace declarations
pub const NAMESPACE_TEMPLATE: &str = "namespace";

pub struct NamespaceEmitter<'a> {
    templates: &'a TemplateRegistry,
    output: &'a dyn OutputService,
}

impl<'a> NamespaceEmitter<'a> {
    pub fn new(templates: &'a TemplateRegistry, output: &'a dyn OutputService) -> Self {
        Self { templates, output }
    }

    /// Render the declaration for one namespace
    pub fn render(&self, scope: &ScopeContext, namespace: &Namespace) -> Result<String> {
        let description = match namespace.description.as_deref().map(str::trim) {
            Some(d) if !d.is_empty() => d.to_string(),
            _ => {
                warn!(namespace = %namespace.name, "namespace has no description, using its display name");
                namespace.display_name.clone()
            }
        };

        let mut context = Context::new();
        context.insert("class_name", &type_name(&namespace.display_name));
        context.insert("display_name", &namespace.display_name);
        context.insert("description_lines", &doc_lines(&description));
        context.insert("scope", &scope.scope);
        context.insert("spec_version", &scope.spec_version);
        context.insert("base_url", &scope.base_url);
        context.insert("runtime_path", &scope.runtime_path);
        context.insert("version", GENERATOR_VERSION);

        self.templates.render(NAMESPACE_TEMPLATE, &context)
    }

    /// Write a fresh namespace file, discarding any previous content
    pub async fn emit(&self, scope: &ScopeContext, namespace: &Namespace) -> Result<PathBuf> {
        let path = scope.namespace_file(namespace);
        info!(namespace = %namespace.name, path = %path.display(), "creating namespace");
        let rendered = self.render(scope, namespace)?;
        self.output.write_fresh(&path, &rendered).await?;
        Ok(path)
    }
}
