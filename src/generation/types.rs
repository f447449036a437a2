//! Core types for the generation domain

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;

use crate::core::error::GeneratorError;

/// HTTP methods considered when walking a path item, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Patch,
}

impl HttpMethod {
    /// Get all HTTP methods as an array
    pub fn all() -> &'static [HttpMethod] {
        &[
            HttpMethod::Get,
            HttpMethod::Put,
            HttpMethod::Post,
            HttpMethod::Delete,
            HttpMethod::Patch,
        ]
    }

    /// Key of this method inside an OpenAPI path item
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
        }
    }

    /// Upper-case verb as sent on the wire
    pub fn as_upper(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a parameter travels in the request (or response negotiation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
    RequestBody,
    ResponseBody,
}

impl FromStr for ParameterLocation {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "path" => Ok(ParameterLocation::Path),
            "query" => Ok(ParameterLocation::Query),
            "header" => Ok(ParameterLocation::Header),
            "cookie" => Ok(ParameterLocation::Cookie),
            other => Err(GeneratorError::invalid_document(format!(
                "unsupported parameter location '{other}'"
            ))),
        }
    }
}

/// Normalized description of one operation input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// Name as written in the specification
    pub name: String,
    /// Language-safe identifier derived from `name`
    pub ident: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Semantic type (`str`, `int`, `bool`, `list`, `dict`, ...)
    #[serde(rename = "type")]
    pub param_type: String,
    pub required: bool,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<JsonValue>,
}

/// Shared-parameter references that expand into client-side convenience values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvenienceKind {
    /// `{db_branch_name}` built from `db_name` and `branch_name`
    DbBranchName,
    /// `{workspace_id}` defaulted from the client
    WorkspaceId,
}

/// One declared response status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseCode {
    pub code: String,
    pub description: String,
}

/// Content type declared by a success response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseContentType {
    pub content_type: String,
    pub code: String,
}

/// Output of parameter curation for a single operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CuratedParameters {
    pub list: Vec<ParameterDescriptor>,
    pub has_path_params: bool,
    pub has_query_params: bool,
    pub has_header_params: bool,
    pub has_optional_params: bool,
    pub has_payload: bool,
    pub has_multiple_content_types: bool,
    pub conveniences: Vec<ConvenienceKind>,
    pub response_codes: Vec<ResponseCode>,
    pub response_content_types: Vec<ResponseContentType>,
}

impl CuratedParameters {
    /// Whether the given convenience substitution was applied
    pub fn has_convenience(&self, kind: ConvenienceKind) -> bool {
        self.conveniences.contains(&kind)
    }

    /// Find a curated parameter by its specification name
    pub fn get(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.list.iter().find(|p| p.name == name)
    }
}

/// A tag group that owns operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
}

impl Namespace {
    /// Build a namespace from one entry of the document's `tags` list
    pub fn from_tag(tag: &JsonValue) -> Result<Self, GeneratorError> {
        let name = tag
            .get("name")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| GeneratorError::invalid_document("tag without a name"))?
            .to_string();
        let display_name = tag
            .get("x-displayName")
            .and_then(JsonValue::as_str)
            .map(String::from)
            .unwrap_or_else(|| name.clone());
        let description = tag
            .get("description")
            .and_then(JsonValue::as_str)
            .map(String::from);

        Ok(Self {
            name,
            display_name,
            description,
        })
    }
}

/// Release status of an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndpointStatus {
    #[serde(rename = "GA")]
    Ga,
    #[serde(rename = "experimental")]
    Experimental,
}

impl fmt::Display for EndpointStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointStatus::Ga => write!(f, "GA"),
            EndpointStatus::Experimental => write!(f, "experimental"),
        }
    }
}

/// Parameter as listed in the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSummary {
    pub name: String,
    pub description: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    pub required: bool,
}

impl From<&ParameterDescriptor> for ParameterSummary {
    fn from(p: &ParameterDescriptor) -> Self {
        Self {
            name: p.name.clone(),
            description: p.description.clone(),
            location: p.location,
            required: p.required,
        }
    }
}

/// Record of one emitted operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointManifestEntry {
    pub namespace: String,
    pub name: String,
    pub operation_id: String,
    pub generated_name: String,
    pub description: String,
    pub method: String,
    pub url_path: String,
    pub responses: Vec<ResponseCode>,
    pub status: EndpointStatus,
    pub parameters: Vec<ParameterSummary>,
}
