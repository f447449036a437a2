//! HTTP-based OpenAPI spec loader

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value as JsonValue;
use tracing::{debug, info};

use super::parse_document;
use crate::core::error::{GeneratorError, Result};
use crate::generation::OpenApiLoader;

/// Loads OpenAPI specifications from HTTP/HTTPS URLs
pub struct HttpOpenApiLoader {
    client: Client,
}

impl HttpOpenApiLoader {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| GeneratorError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl OpenApiLoader for HttpOpenApiLoader {
    async fn load(&self, source: &str) -> Result<JsonValue> {
        if !source.starts_with("http://") && !source.starts_with("https://") {
            return Err(GeneratorError::spec_fetch(source, "not an HTTP(S) URL"));
        }

        info!(url = source, "Fetching spec");
        let response = self
            .client
            .get(source)
            .send()
            .await
            .map_err(|e| GeneratorError::spec_fetch(source, e.to_string()))?;

        // only a plain 200 counts, redirects are followed by reqwest
        let status = response.status();
        if status != StatusCode::OK {
            return Err(GeneratorError::spec_fetch(source, format!("HTTP {status}")));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let content = response
            .text()
            .await
            .map_err(|e| GeneratorError::spec_fetch(source, e.to_string()))?;
        debug!(bytes = content.len(), content_type = %content_type, "Spec downloaded");

        let hint = if content_type.is_empty() {
            source
        } else {
            content_type.as_str()
        };
        parse_document(&content, hint)
    }
}
