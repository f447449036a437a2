//! OpenAPI loading implementations

pub mod composite_loader;
pub mod file_loader;
pub mod http_loader;

pub use composite_loader::CompositeOpenApiLoader;
pub use file_loader::FileOpenApiLoader;
pub use http_loader::HttpOpenApiLoader;

use serde_json::Value as JsonValue;

use crate::core::error::{GeneratorError, Result};

/// Parse document text as JSON or YAML.
///
/// `hint` is a content type or file name; without a recognizable hint JSON is
/// tried first, then YAML.
pub(crate) fn parse_document(content: &str, hint: &str) -> Result<JsonValue> {
    let hint = hint.to_lowercase();
    if hint.contains("json") {
        Ok(serde_json::from_str(content)?)
    } else if hint.contains("yaml") || hint.ends_with(".yml") {
        Ok(serde_yaml::from_str(content)?)
    } else {
        serde_json::from_str(content)
            .or_else(|_| serde_yaml::from_str(content))
            .map_err(|e| GeneratorError::invalid_document(format!("not JSON or YAML: {e}")))
    }
}
