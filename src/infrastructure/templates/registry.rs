//! Named tera templates: compiled-in defaults plus directory overrides

use std::path::Path;

use tera::{Context, Tera};
use tokio::fs;
use tracing::{debug, info};

use super::filters::register_filters;
use crate::core::error::{GeneratorError, Result};

/// Extension of template files in an override directory
pub const TEMPLATE_EXTENSION: &str = "tera";

/// Templates compiled into the binary, by name
pub const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (
        "namespace",
        include_str!("../../../templates/namespace.rs.tera"),
    ),
    ("endpoint", include_str!("../../../templates/endpoint.rs.tera")),
    (
        "endpoint_binary",
        include_str!("../../../templates/endpoint_binary.rs.tera"),
    ),
];

/// Every template available to the emitters
#[derive(Debug)]
pub struct TemplateRegistry {
    tera: Tera,
}

impl TemplateRegistry {
    /// Registry holding only the built-in templates
    pub fn builtin() -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        register_filters(&mut tera);
        tera.add_raw_templates(BUILTIN_TEMPLATES.iter().copied())?;
        Ok(Self { tera })
    }

    /// Built-ins, then every `<name>.tera` file in `dir` on top.
    ///
    /// A file named like a built-in replaces it; other names add templates.
    pub async fn load(dir: Option<&Path>) -> Result<Self> {
        let mut registry = Self::builtin()?;
        if let Some(dir) = dir {
            let overrides = load_template_dir(dir).await?;
            info!(
                template_dir = %dir.display(),
                count = overrides.len(),
                "Loaded template overrides"
            );
            registry.tera.add_raw_templates(overrides)?;
        }
        Ok(registry)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    /// Sorted template names
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.tera.get_template_names().collect();
        names.sort_unstable();
        names
    }

    /// Fail with a configuration error naming the first missing template
    pub fn ensure<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Result<()> {
        for name in names {
            if !self.contains(name) {
                return Err(GeneratorError::config(format!(
                    "template '{name}' does not exist (available: {})",
                    self.names().join(", ")
                )));
            }
        }
        Ok(())
    }

    pub fn render(&self, name: &str, context: &Context) -> Result<String> {
        debug!(template = name, "Rendering");
        Ok(self.tera.render(name, context)?)
    }
}

/// Read `(name, source)` pairs for every `*.tera` file directly inside `dir`
async fn load_template_dir(dir: &Path) -> Result<Vec<(String, String)>> {
    let mut entries = fs::read_dir(dir).await.map_err(|e| {
        GeneratorError::config(format!(
            "Failed to read template directory {}: {e}",
            dir.display()
        ))
    })?;

    let mut templates = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(TEMPLATE_EXTENSION) {
            continue;
        }
        // `endpoint.rs.tera` and `endpoint.tera` both name `endpoint`
        let Some(name) = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.split('.').next())
        else {
            continue;
        };
        let content = fs::read_to_string(&path).await?;
        debug!(template = name, path = %path.display(), "Found template override");
        templates.push((name.to_string(), content));
    }
    templates.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(templates)
}
