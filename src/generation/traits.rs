//! Port interfaces for the generation domain

use std::path::Path;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::core::error::Result;

/// Loads OpenAPI specifications
#[async_trait]
pub trait OpenApiLoader: Send + Sync {
    /// Load a specification document from a source as a generic value tree.
    ///
    /// Failing to reach or read the source is `SpecFetchFailed`.
    async fn load(&self, source: &str) -> Result<JsonValue>;
}

/// Writes generated files
#[async_trait]
pub trait OutputService: Send + Sync {
    /// Create or truncate `path` and write `content`
    async fn write_fresh(&self, path: &Path, content: &str) -> Result<()>;

    /// Append `content` to `path`, creating it when absent
    async fn append(&self, path: &Path, content: &str) -> Result<()>;

    /// Create a directory and its parents
    async fn ensure_directory(&self, path: &Path) -> Result<()>;
}
