//! Runtime used by generated namespaces.
//!
//! Generated code builds a path, collects query parameters, headers and a
//! body into [`RequestOptions`], and hands everything to
//! [`ApiClient::request`], which returns the raw response.
//!
//! # Examples
//!
//! ```no_run
//! use apigen::client::ApiClient;
//! use apigen::client::namespaces::Authentication;
//!
//! # async fn run() -> Result<(), apigen::client::ClientError> {
//! let client = ApiClient::builder("xau_secret").workspace_id("ws-1234").build()?;
//! let response = Authentication::new(&client).get_user_apikeys().await?;
//! println!("{}", response.status());
//! # Ok(())
//! # }
//! ```

pub mod namespaces;

use std::time::Duration;

use reqwest::{Client, Method, Response};
use serde_json::Value as JsonValue;
use thiserror::Error;
use tracing::debug;

/// Branch used when neither the call nor the client names one
pub const DEFAULT_BRANCH: &str = "main";

/// Region substituted into `{regionId}` when none is configured
pub const DEFAULT_REGION: &str = "us-east-1";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ClientError {
    /// A convenience value was neither passed nor configured
    #[error("no {0} given and no default configured on the client")]
    MissingValue(&'static str),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Static description of a generated namespace
pub trait Namespace {
    /// API scope the namespace was generated from
    const SCOPE: &'static str;
    /// Base URL template, possibly containing `{workspaceId}` / `{regionId}`
    const BASE_URL: &'static str;
}

enum RequestBody {
    Json(JsonValue),
    Bytes(Vec<u8>),
}

/// Query, headers and body of one call
#[derive(Default)]
pub struct RequestOptions {
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Option<RequestBody>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn header(mut self, key: &str, value: impl Into<String>) -> Self {
        self.headers.push((key.to_string(), value.into()));
        self
    }

    /// Send `value` as a JSON body
    pub fn json(mut self, value: JsonValue) -> Self {
        self.body = Some(RequestBody::Json(value));
        self
    }

    /// Send raw bytes; set `Content-Type` yourself
    pub fn body(mut self, bytes: Vec<u8>) -> Self {
        self.body = Some(RequestBody::Bytes(bytes));
        self
    }
}

/// Shared HTTP client plus the defaults generated methods fall back on
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    api_key: String,
    workspace_id: Option<String>,
    region: String,
    db_name: Option<String>,
    branch_name: String,
    base_url: Option<String>,
}

impl ApiClient {
    pub fn builder(api_key: impl Into<String>) -> ApiClientBuilder {
        ApiClientBuilder::new(api_key)
    }

    /// `{db_name}:{branch_name}`, each falling back to the client default
    pub fn db_branch_name(
        &self,
        db_name: Option<&str>,
        branch_name: Option<&str>,
    ) -> Result<String, ClientError> {
        let db_name = db_name
            .or(self.db_name.as_deref())
            .ok_or(ClientError::MissingValue("db_name"))?;
        let branch_name = branch_name.unwrap_or(&self.branch_name);
        Ok(format!("{db_name}:{branch_name}"))
    }

    pub fn workspace_id(&self, workspace_id: Option<&str>) -> Result<String, ClientError> {
        workspace_id
            .or(self.workspace_id.as_deref())
            .map(String::from)
            .ok_or(ClientError::MissingValue("workspace_id"))
    }

    /// Fill `{workspaceId}` and `{regionId}` in a namespace base URL.
    ///
    /// A base URL set on the builder wins over the template.
    pub fn resolve_base_url(&self, template: &str) -> Result<String, ClientError> {
        if let Some(base_url) = &self.base_url {
            return Ok(base_url.clone());
        }
        let mut url = template.replace("{regionId}", &self.region);
        if url.contains("{workspaceId}") {
            url = url.replace("{workspaceId}", &self.workspace_id(None)?);
        }
        Ok(url)
    }

    /// Send one request and return the response untouched
    pub async fn request(
        &self,
        method: Method,
        base_url: &str,
        path: &str,
        options: RequestOptions,
    ) -> Result<Response, ClientError> {
        let url = format!("{}{path}", self.resolve_base_url(base_url)?);
        debug!(method = %method, url = %url, "Sending request");

        let mut request = self
            .http
            .request(method, &url)
            .bearer_auth(&self.api_key)
            .query(&options.query);
        for (key, value) in &options.headers {
            request = request.header(key.as_str(), value.as_str());
        }
        request = match options.body {
            Some(RequestBody::Json(value)) => request.json(&value),
            Some(RequestBody::Bytes(bytes)) => request.body(bytes),
            None => request,
        };

        Ok(request.send().await?)
    }
}

/// Builder for [`ApiClient`]
#[derive(Debug, Clone)]
pub struct ApiClientBuilder {
    api_key: String,
    workspace_id: Option<String>,
    region: String,
    db_name: Option<String>,
    branch_name: String,
    base_url: Option<String>,
    timeout: Duration,
}

impl ApiClientBuilder {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            workspace_id: None,
            region: DEFAULT_REGION.to_string(),
            db_name: None,
            branch_name: DEFAULT_BRANCH.to_string(),
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn workspace_id(mut self, workspace_id: impl Into<String>) -> Self {
        self.workspace_id = Some(workspace_id.into());
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn db_name(mut self, db_name: impl Into<String>) -> Self {
        self.db_name = Some(db_name.into());
        self
    }

    pub fn branch_name(mut self, branch_name: impl Into<String>) -> Self {
        self.branch_name = branch_name.into();
        self
    }

    /// Send every request here instead of the namespace base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<ApiClient, ClientError> {
        let http = Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(ApiClient {
            http,
            api_key: self.api_key,
            workspace_id: self.workspace_id,
            region: self.region,
            db_name: self.db_name,
            branch_name: self.branch_name,
            base_url: self.base_url,
        })
    }
}
