//! Composite OpenAPI loader that dispatches on the source kind

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tracing::debug;

use super::{FileOpenApiLoader, HttpOpenApiLoader};
use crate::core::error::Result;
use crate::generation::OpenApiLoader;

/// Routes URLs to the HTTP loader and everything else to the file loader
pub struct CompositeOpenApiLoader {
    http: HttpOpenApiLoader,
    file: FileOpenApiLoader,
}

impl CompositeOpenApiLoader {
    pub fn new() -> Result<Self> {
        Ok(Self {
            http: HttpOpenApiLoader::new()?,
            file: FileOpenApiLoader::new(),
        })
    }
}

#[async_trait]
impl OpenApiLoader for CompositeOpenApiLoader {
    async fn load(&self, source: &str) -> Result<JsonValue> {
        if source.starts_with("http://") || source.starts_with("https://") {
            debug!("CompositeOpenApiLoader: Using HTTP loader for {source}");
            self.http.load(source).await
        } else {
            debug!("CompositeOpenApiLoader: Using file loader for {source}");
            self.file.load(source).await
        }
    }
}
