//! File-based OpenAPI spec loader

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tokio::fs;
use tracing::info;

use super::parse_document;
use crate::core::error::{GeneratorError, Result};
use crate::generation::OpenApiLoader;

/// Loads OpenAPI specifications from local files
#[derive(Debug, Default)]
pub struct FileOpenApiLoader;

impl FileOpenApiLoader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OpenApiLoader for FileOpenApiLoader {
    async fn load(&self, source: &str) -> Result<JsonValue> {
        info!(path = source, "Reading spec");
        let content = fs::read_to_string(source)
            .await
            .map_err(|e| GeneratorError::spec_fetch(source, e.to_string()))?;

        parse_document(&content, source)
    }
}
