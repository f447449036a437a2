//! Renders one method per operation and records it in the manifest

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;
use serde_json::Value as JsonValue;
use tera::Context;
use tracing::{debug, info, warn};

use crate::core::error::Result;
use crate::generation::curator::ParameterCurator;
use crate::generation::manifest::ManifestBuilder;
use crate::generation::renames::RenameMapping;
use crate::generation::rules::DEFAULT_TEMPLATE;
use crate::generation::sanitizers::doc_lines;
use crate::generation::utils::{docs_url, fn_name, param_ident, sanitize_filename, type_name};
use crate::generation::{
    ConvenienceKind, CuratedParameters, EndpointManifestEntry, EndpointStatus, HttpMethod,
    Namespace, OutputService, ParameterDescriptor, ParameterLocation, ParameterSummary,
    ScopeContext,
};
use crate::infrastructure::templates::TemplateRegistry;

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}]+)\}").expect("path placeholder regex"));

/// Parameter as seen by templates
#[derive(Debug, Serialize)]
struct TemplateParameter<'p> {
    name: &'p str,
    ident: &'p str,
    location: ParameterLocation,
    #[serde(rename = "type")]
    param_type: &'p str,
    required: bool,
    description: &'p str,
}

impl<'p> From<&'p ParameterDescriptor> for TemplateParameter<'p> {
    fn from(p: &'p ParameterDescriptor) -> Self {
        Self {
            name: &p.name,
            ident: &p.ident,
            location: p.location,
            param_type: &p.param_type,
            required: p.required,
            description: &p.description,
        }
    }
}

/// One operation as found while walking `paths`
#[derive(Debug, Clone, Copy)]
pub struct EndpointInput<'s> {
    pub namespace: &'s Namespace,
    pub path: &'s str,
    pub method: HttpMethod,
    pub operation: &'s JsonValue,
    /// Parameters declared on the path item, shared by all its operations
    pub path_parameters: &'s [JsonValue],
}

/// A rendered endpoint fragment and its manifest record
#[derive(Debug, Clone)]
pub struct RenderedEndpoint {
    pub template: String,
    pub source: String,
    pub entry: EndpointManifestEntry,
}

pub struct EndpointEmitter<'a> {
    templates: &'a TemplateRegistry,
    output: &'a dyn OutputService,
    curator: &'a ParameterCurator<'a>,
    renames: &'a RenameMapping,
}

impl<'a> EndpointEmitter<'a> {
    pub fn new(
        templates: &'a TemplateRegistry,
        output: &'a dyn OutputService,
        curator: &'a ParameterCurator<'a>,
        renames: &'a RenameMapping,
    ) -> Self {
        Self {
            templates,
            output,
            curator,
            renames,
        }
    }

    /// Curate, name and render one operation without touching the filesystem
    pub fn render(&self, scope: &ScopeContext, input: &EndpointInput<'_>) -> Result<RenderedEndpoint> {
        let operation = input.operation;
        let parameters: Vec<JsonValue> = input
            .path_parameters
            .iter()
            .chain(array_field(operation, "parameters"))
            .cloned()
            .collect();
        let curated = self.curator.curate(&parameters, operation)?;

        let summary = str_field(operation, "summary").unwrap_or_default();
        let operation_id = match str_field(operation, "operationId") {
            Some(id) => id.to_string(),
            None => {
                let fallback = format!("{}_{}", input.method, input.path);
                warn!(path = input.path, method = %input.method, operation_id = %fallback, "operation has no operationId");
                fallback
            }
        };
        let description = endpoint_description(operation, &operation_id);

        let (generated_name, template) =
            match self.renames.lookup(&sanitize_filename(&input.namespace.name), &operation_id) {
                Some(rename) => {
                    debug!(
                        operation_id = %operation_id,
                        name = %rename.name,
                        template = %rename.template,
                        "renaming endpoint"
                    );
                    (rename.name.clone(), rename.template.clone())
                }
                None => (fn_name(&operation_id), DEFAULT_TEMPLATE.to_string()),
            };

        let status = if operation.get("x-experimental").is_some() {
            EndpointStatus::Experimental
        } else {
            EndpointStatus::Ga
        };
        let url_path = rewrite_placeholders(input.path, &curated);

        let mut context = Context::new();
        context.insert("class_name", &type_name(&input.namespace.display_name));
        context.insert("fn_name", &generated_name);
        context.insert("operation_id", &operation_id);
        context.insert("description_lines", &doc_lines(&description));
        context.insert("http_method", input.method.as_upper());
        context.insert("path", input.path);
        context.insert("url_path", &url_path);
        context.insert("url_has_placeholders", &PLACEHOLDER_RE.is_match(&url_path));
        let params: Vec<TemplateParameter<'_>> =
            curated.list.iter().map(TemplateParameter::from).collect();
        context.insert("params", &params);
        context.insert(
            "has_request_options",
            &curated
                .list
                .iter()
                .any(|p| p.location != ParameterLocation::Path),
        );
        context.insert(
            "has_db_branch_name",
            &curated.has_convenience(ConvenienceKind::DbBranchName),
        );
        context.insert(
            "has_workspace_id",
            &curated.has_convenience(ConvenienceKind::WorkspaceId),
        );
        context.insert("has_payload", &curated.has_payload);
        context.insert(
            "default_content_type",
            &curated
                .get("response_content_type")
                .and_then(|p| p.default.as_ref())
                .and_then(JsonValue::as_str)
                .unwrap_or(""),
        );
        context.insert("status", &status.to_string());
        context.insert("docs_url", &docs_url(&scope.docs_base_url, input.path, summary));
        context.insert("scope", &scope.scope);
        context.insert("base_url", &scope.base_url);

        let source = self.templates.render(&template, &context)?;

        let entry = EndpointManifestEntry {
            namespace: input.namespace.name.clone(),
            name: summary.to_string(),
            operation_id,
            generated_name,
            description,
            method: input.method.as_upper().to_string(),
            url_path: input.path.to_string(),
            responses: curated.response_codes.clone(),
            status,
            parameters: curated.list.iter().map(ParameterSummary::from).collect(),
        };

        Ok(RenderedEndpoint {
            template,
            source,
            entry,
        })
    }

    /// Append the endpoint to its namespace file and record it in `manifest`
    pub async fn emit(
        &self,
        scope: &ScopeContext,
        input: &EndpointInput<'_>,
        manifest: &mut ManifestBuilder,
    ) -> Result<()> {
        let rendered = self.render(scope, input)?;
        let path = scope.namespace_file(input.namespace);
        self.output.append(&path, &rendered.source).await?;

        info!(
            namespace = %input.namespace.name,
            operation_id = %rendered.entry.operation_id,
            template = %rendered.template,
            "emitted endpoint"
        );
        manifest.push_endpoint(rendered.entry);
        Ok(())
    }
}

fn str_field<'v>(value: &'v JsonValue, key: &str) -> Option<&'v str> {
    value.get(key).and_then(JsonValue::as_str)
}

fn array_field<'v>(value: &'v JsonValue, key: &str) -> &'v [JsonValue] {
    value
        .get(key)
        .and_then(JsonValue::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Description, falling back to the summary, then to empty
fn endpoint_description(operation: &JsonValue, operation_id: &str) -> String {
    if let Some(description) = str_field(operation, "description") {
        return description.trim().to_string();
    }
    if let Some(summary) = str_field(operation, "summary") {
        info!(operation_id, "no description, using summary");
        return summary.trim().to_string();
    }
    warn!(operation_id, "operation has neither description nor summary");
    String::new()
}

/// Rewrite `{name}` segments to the matching parameter identifier
fn rewrite_placeholders(path: &str, curated: &CuratedParameters) -> String {
    PLACEHOLDER_RE
        .replace_all(path, |caps: &Captures<'_>| {
            let name = &caps[1];
            let ident = curated
                .list
                .iter()
                .find(|p| p.location == ParameterLocation::Path && p.name == name)
                .map(|p| p.ident.clone())
                .unwrap_or_else(|| param_ident(name));
            format!("{{{ident}}}")
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GeneratorConfig;
    use crate::generation::ReferenceTable;
    use crate::generation::rules::ConvenienceRules;
    use crate::infrastructure::output::FileSystemOutputService;
    use serde_json::json;
    use tempfile::TempDir;

    fn namespace() -> Namespace {
        Namespace {
            name: "Authentication".to_string(),
            display_name: "Authentication".to_string(),
            description: None,
        }
    }

    fn scope(dir: &TempDir) -> ScopeContext {
        let config = GeneratorConfig {
            output_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        ScopeContext::new(&config, &config.scopes[0], "1.0")
    }

    fn create_key_operation() -> JsonValue {
        json!({
            "operationId": "createUserAPIKey",
            "summary": "Create and return new API key",
            "tags": ["Authentication"],
            "parameters": [{
                "name": "key_name",
                "in": "path",
                "required": true,
                "description": "API Key name",
                "schema": { "type": "string" }
            }],
            "responses": {
                "201": { "description": "OK" },
                "400": { "description": "Bad Request" }
            }
        })
    }

    struct Fixture {
        table: ReferenceTable,
        rules: ConvenienceRules,
        templates: TemplateRegistry,
        output: FileSystemOutputService,
    }

    impl Fixture {
        fn new(components: JsonValue) -> Self {
            Self {
                table: ReferenceTable::resolve(&json!({ "components": components })),
                rules: ConvenienceRules::default(),
                templates: TemplateRegistry::builtin().unwrap(),
                output: FileSystemOutputService::new(),
            }
        }
    }

    #[test]
    fn test_render_simple_endpoint() {
        let dir = TempDir::new().unwrap();
        let fixture = Fixture::new(json!({}));
        let curator = ParameterCurator::new(&fixture.table, &fixture.rules);
        let renames = RenameMapping::empty();
        let emitter = EndpointEmitter::new(&fixture.templates, &fixture.output, &curator, &renames);

        let ns = namespace();
        let operation = create_key_operation();
        let rendered = emitter
            .render(
                &scope(&dir),
                &EndpointInput {
                    namespace: &ns,
                    path: "/user/keys/{key_name}",
                    method: HttpMethod::Post,
                    operation: &operation,
                    path_parameters: &[],
                },
            )
            .unwrap();

        assert_eq!(rendered.template, "endpoint");
        assert!(rendered.source.contains("impl Authentication<'_> {"));
        assert!(rendered.source.contains("    /// Create and return new API key\n"));
        assert!(rendered.source.contains("pub async fn create_user_apikey(\n        &self,\n        key_name: &str,\n    )"));
        assert!(rendered.source.contains("let path = format!(\"/user/keys/{key_name}\");"));
        assert!(rendered.source.contains("let options = RequestOptions::new();"));
        assert!(rendered.source.contains("Method::POST"));
        assert!(rendered.source.contains(
            "Docs: <https://xata.io/docs/api-reference/user/keys/key_name#create-and-return-new-api-key>"
        ));

        let entry = rendered.entry;
        assert_eq!(entry.operation_id, "createUserAPIKey");
        assert_eq!(entry.generated_name, "create_user_apikey");
        assert_eq!(entry.description, "Create and return new API key");
        assert_eq!(entry.method, "POST");
        assert_eq!(entry.status, EndpointStatus::Ga);
        assert_eq!(entry.responses.len(), 2);
        assert_eq!(entry.parameters.len(), 1);
        assert_eq!(entry.parameters[0].location, ParameterLocation::Path);
    }

    #[test]
    fn test_render_query_payload_and_conveniences() {
        let dir = TempDir::new().unwrap();
        let fixture = Fixture::new(json!({
            "parameters": {
                "DBBranchNameParam": {
                    "name": "db_branch_name", "in": "path", "required": true,
                    "schema": { "type": "string" }
                }
            }
        }));
        let curator = ParameterCurator::new(&fixture.table, &fixture.rules);
        let renames = RenameMapping::empty();
        let emitter = EndpointEmitter::new(&fixture.templates, &fixture.output, &curator, &renames);

        let ns = Namespace {
            name: "Table".to_string(),
            display_name: "Table".to_string(),
            description: None,
        };
        let path_parameters = vec![
            json!({ "$ref": "#/components/parameters/DBBranchNameParam" }),
            json!({ "name": "table_name", "in": "path", "required": true, "schema": { "type": "string" } }),
        ];
        let operation = json!({
            "operationId": "queryTable",
            "description": "Query a table.\n\nSecond paragraph.",
            "x-experimental": {},
            "parameters": [
                { "name": "columns", "in": "query", "schema": { "type": "array" } },
                { "name": "X-Request-Id", "in": "header", "required": true, "schema": { "type": "string" } }
            ],
            "requestBody": { "content": { "application/json": {} } },
            "responses": {
                "200": { "content": { "application/json": {}, "text/csv": {} } }
            }
        });

        let rendered = emitter
            .render(
                &scope(&dir),
                &EndpointInput {
                    namespace: &ns,
                    path: "/db/{db_branch_name}/tables/{table_name}/query",
                    method: HttpMethod::Post,
                    operation: &operation,
                    path_parameters: &path_parameters,
                },
            )
            .unwrap();
        let src = &rendered.source;

        assert!(src.contains("    /// Query a table.\n    ///\n    /// Second paragraph.\n"));
        assert!(src.contains("Status: experimental"));
        assert!(src.contains("let db_branch_name = self.client.db_branch_name(db_name, branch_name)?;"));
        assert!(src.contains("format!(\"/db/{db_branch_name}/tables/{table_name}/query\")"));
        assert!(src.contains("        payload: serde_json::Value,\n"));
        assert!(src.contains("        db_name: Option<&str>,\n"));
        assert!(src.contains("        columns: Option<&[&str]>,\n"));
        assert!(src.contains("options = options.header(\"X-Request-Id\", x_request_id);"));
        assert!(src.contains("if let Some(columns) = columns {"));
        assert!(src.contains("options.query(\"columns\", columns.join(\",\"))"));
        assert!(src.contains("options = options.json(payload);"));
        assert!(src.contains(
            "options = options.header(\"Accept\", response_content_type.unwrap_or(\"application/json\"));"
        ));

        // required parameters are declared before optional ones
        let table_pos = src.find("table_name: &str").unwrap();
        let db_pos = src.find("db_name: Option<&str>").unwrap();
        assert!(table_pos < db_pos);

        assert_eq!(rendered.entry.status, EndpointStatus::Experimental);
    }

    #[test]
    fn test_rename_overrides_name_and_template() {
        let dir = TempDir::new().unwrap();
        let fixture = Fixture::new(json!({}));
        let curator = ParameterCurator::new(&fixture.table, &fixture.rules);
        let renames = RenameMapping::from_json(
            r#"{"files": {"putFileItem": {"name": "put_item", "template": "endpoint_binary"}}}"#,
        )
        .unwrap();
        let emitter = EndpointEmitter::new(&fixture.templates, &fixture.output, &curator, &renames);

        let ns = Namespace {
            name: "Files".to_string(),
            display_name: "Files".to_string(),
            description: None,
        };
        let operation = json!({
            "operationId": "putFileItem",
            "summary": "Uploads the file content to an array given a file reference",
            "parameters": [
                { "name": "file_id", "in": "path", "schema": { "type": "string" } },
                { "name": "X-Trace", "in": "header", "required": true, "schema": { "type": "string" } },
                { "name": "session", "in": "cookie", "schema": { "type": "string" } }
            ],
            "requestBody": { "content": { "*/*": {} } },
            "responses": {
                "201": { "content": { "application/json": {}, "text/plain": {} } }
            }
        });

        let rendered = emitter
            .render(
                &scope(&dir),
                &EndpointInput {
                    namespace: &ns,
                    path: "/files/{file_id}",
                    method: HttpMethod::Put,
                    operation: &operation,
                    path_parameters: &[],
                },
            )
            .unwrap();

        assert_eq!(rendered.template, "endpoint_binary");
        assert_eq!(rendered.entry.generated_name, "put_item");
        assert!(rendered.source.contains("pub async fn put_item("));
        assert!(rendered.source.contains("payload: Vec<u8>,"));
        assert!(rendered.source.contains("content_type: Option<&str>,"));
        assert!(rendered.source.contains("options = options.body(payload);"));

        let src = &rendered.source;
        // a path parameter is required even when the document omits it
        assert!(src.contains("        file_id: &str,\n"));
        assert!(src.contains("    /// * `file_id`\n"));
        assert!(!src.contains(" - \n"));
        assert!(src.contains("options = options.header(\"X-Trace\", x_trace);"));
        assert!(src.contains("if let Some(session) = session {"));
        assert!(src.contains("options.header(\"Cookie\", format!(\"session={}\", session))"));
        assert!(src.contains(
            "options = options.header(\"Accept\", response_content_type.unwrap_or(\"application/json\"));"
        ));
    }

    #[test]
    fn test_missing_operation_id_and_descriptions() {
        let dir = TempDir::new().unwrap();
        let fixture = Fixture::new(json!({}));
        let curator = ParameterCurator::new(&fixture.table, &fixture.rules);
        let renames = RenameMapping::empty();
        let emitter = EndpointEmitter::new(&fixture.templates, &fixture.output, &curator, &renames);

        let ns = namespace();
        let operation = json!({});
        let rendered = emitter
            .render(
                &scope(&dir),
                &EndpointInput {
                    namespace: &ns,
                    path: "/user",
                    method: HttpMethod::Get,
                    operation: &operation,
                    path_parameters: &[],
                },
            )
            .unwrap();

        assert_eq!(rendered.entry.operation_id, "get_/user");
        assert_eq!(rendered.entry.generated_name, "get_user");
        assert_eq!(rendered.entry.description, "");
        assert!(rendered.source.contains("let path = \"/user\";"));
    }

    #[tokio::test]
    async fn test_emit_appends_and_records() {
        let dir = TempDir::new().unwrap();
        let fixture = Fixture::new(json!({}));
        let curator = ParameterCurator::new(&fixture.table, &fixture.rules);
        let renames = RenameMapping::empty();
        let emitter = EndpointEmitter::new(&fixture.templates, &fixture.output, &curator, &renames);
        let scope = scope(&dir);
        let ns = namespace();
        let mut manifest = ManifestBuilder::new("core", "1.0", "sum", &scope.base_url);

        let path = scope.namespace_file(&ns);
        std::fs::write(&path, "// header\n").unwrap();

        let operation = create_key_operation();
        for method in [HttpMethod::Post, HttpMethod::Delete] {
            emitter
                .emit(
                    &scope,
                    &EndpointInput {
                        namespace: &ns,
                        path: "/user/keys/{key_name}",
                        method,
                        operation: &operation,
                        path_parameters: &[],
                    },
                    &mut manifest,
                )
                .await
                .unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("// header\n"));
        assert_eq!(content.matches("impl Authentication<'_>").count(), 2);
        assert_eq!(manifest.endpoints().len(), 2);
        assert_eq!(manifest.endpoints()[1].method, "DELETE");
    }

    #[test]
    fn test_rewrite_placeholders() {
        let curated = CuratedParameters {
            list: vec![ParameterDescriptor {
                name: "workspaceId".to_string(),
                ident: "workspace_id".to_string(),
                location: ParameterLocation::Path,
                param_type: "str".to_string(),
                required: true,
                description: String::new(),
                default: None,
            }],
            ..Default::default()
        };
        assert_eq!(
            rewrite_placeholders("/workspaces/{workspaceId}/dbs/{dbName}", &curated),
            "/workspaces/{workspace_id}/dbs/{db_name}"
        );
    }
}
