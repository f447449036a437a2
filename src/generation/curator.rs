//! Parameter curation: from raw OpenAPI parameter lists to ordered,
//! deduplicated method signatures.

use std::collections::HashSet;

use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::core::error::{GeneratorError, Result};
use crate::generation::rules::{
    payload_parameter, response_content_type_parameter, type_replacement, ConvenienceRules,
};
use crate::generation::utils::param_ident;
use crate::generation::{
    ConvenienceKind, CuratedParameters, ParameterDescriptor, ParameterLocation, ReferenceTable,
    ResponseCode, ResponseContentType,
};

/// A parameter after convenience substitution, before resolution
#[derive(Debug, Clone)]
pub enum ParameterSource<'a> {
    /// Untouched entry from the document (inline or `$ref`)
    Raw(&'a JsonValue),
    /// Replacement produced by a convenience rule
    Curated(ParameterDescriptor),
}

/// Replace recognized shared references with their convenience parameters.
///
/// Pure over its inputs; returns the rewritten list and the rules that fired,
/// in first-fired order.
pub fn apply_convenience_rules<'a>(
    parameters: &'a [JsonValue],
    rules: &ConvenienceRules,
) -> (Vec<ParameterSource<'a>>, Vec<ConvenienceKind>) {
    let mut sources = Vec::with_capacity(parameters.len());
    let mut applied = Vec::new();

    for param in parameters {
        let rule = param
            .get("$ref")
            .and_then(JsonValue::as_str)
            .and_then(|r| rules.find(r));
        match rule {
            Some(rule) => {
                debug!(reference = %rule.reference, "adding convenience parameters");
                sources.extend(rule.replacements.iter().cloned().map(ParameterSource::Curated));
                if !applied.contains(&rule.kind) {
                    applied.push(rule.kind);
                }
            }
            None => sources.push(ParameterSource::Raw(param)),
        }
    }

    (sources, applied)
}

/// Curates the parameters of one operation against a reference table
pub struct ParameterCurator<'a> {
    references: &'a ReferenceTable,
    rules: &'a ConvenienceRules,
}

impl<'a> ParameterCurator<'a> {
    pub fn new(references: &'a ReferenceTable, rules: &'a ConvenienceRules) -> Self {
        Self { references, rules }
    }

    /// Produce the final parameter list and aggregate flags for an operation.
    ///
    /// `parameters` is the merged list: path-level entries first, then the
    /// operation's own.
    pub fn curate(
        &self,
        parameters: &[JsonValue],
        operation: &JsonValue,
    ) -> Result<CuratedParameters> {
        let (sources, conveniences) = apply_convenience_rules(parameters, self.rules);

        let mut list = sources
            .into_iter()
            .map(|source| match source {
                ParameterSource::Raw(raw) => self.resolve_parameter(raw),
                ParameterSource::Curated(descriptor) => Ok(descriptor),
            })
            .collect::<Result<Vec<_>>>()?;

        let has_payload = operation.get("requestBody").is_some();
        if has_payload {
            push_synthetic(&mut list, payload_parameter());
        }

        let (response_codes, response_content_types) = self.collect_responses(operation);
        let distinct_types: HashSet<String> = response_content_types
            .iter()
            .map(|ct| normalize_content_type(&ct.content_type))
            .collect();
        let has_multiple_content_types = distinct_types.len() > 1;
        if has_multiple_content_types {
            if let Some(first) = response_content_types.first() {
                let default = normalize_content_type(&first.content_type);
                push_synthetic(&mut list, response_content_type_parameter(&default));
            }
        }

        let list = required_first(dedupe_by_name(list));

        Ok(CuratedParameters {
            has_path_params: list.iter().any(|p| p.location == ParameterLocation::Path),
            has_query_params: list.iter().any(|p| p.location == ParameterLocation::Query),
            has_header_params: list.iter().any(|p| {
                matches!(
                    p.location,
                    ParameterLocation::Header | ParameterLocation::Cookie
                )
            }),
            has_optional_params: list.iter().any(|p| !p.required),
            has_payload,
            has_multiple_content_types,
            list,
            conveniences,
            response_codes,
            response_content_types,
        })
    }

    /// Turn one raw parameter (inline or `$ref`) into a descriptor
    fn resolve_parameter(&self, raw: &JsonValue) -> Result<ParameterDescriptor> {
        let (definition, origin) = match raw.get("$ref").and_then(JsonValue::as_str) {
            Some(reference) => (self.references.require(reference)?, reference.to_string()),
            None => (raw, String::from("inline parameter")),
        };

        let name = definition
            .get("name")
            .and_then(JsonValue::as_str)
            .map(str::trim)
            .ok_or_else(|| {
                GeneratorError::invalid_document(format!("{origin} has no name"))
            })?
            .to_string();

        let location = definition
            .get("in")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| {
                GeneratorError::invalid_document(format!("parameter '{name}' has no location"))
            })?
            .parse::<ParameterLocation>()?;

        let schema = definition.get("schema");
        let param_type = self.schema_type(schema, &name)?;

        // path segments can't be left out of the URL
        let required = location == ParameterLocation::Path
            || definition
                .get("required")
                .and_then(JsonValue::as_bool)
                .unwrap_or(false);

        Ok(ParameterDescriptor {
            ident: param_ident(&name),
            location,
            param_type,
            required,
            description: definition
                .get("description")
                .and_then(JsonValue::as_str)
                .map(|d| d.trim().to_string())
                .unwrap_or_default(),
            default: schema.and_then(|s| s.get("default")).cloned(),
            name,
        })
    }

    /// Semantic type of a parameter schema, following one level of `$ref`
    fn schema_type(&self, schema: Option<&JsonValue>, name: &str) -> Result<String> {
        let Some(schema) = schema else {
            warn!(parameter = name, "parameter without schema, typing as any");
            return Ok("any".to_string());
        };

        let typed = match schema.get("$ref").and_then(JsonValue::as_str) {
            Some(reference) => self.references.require(reference)?,
            None => schema,
        };

        match typed.get("type").and_then(JsonValue::as_str) {
            Some(t) => Ok(type_replacement(t)),
            None => {
                warn!(parameter = name, "could not determine schema type, typing as any");
                Ok("any".to_string())
            }
        }
    }

    /// Response codes in document order plus success content types
    fn collect_responses(
        &self,
        operation: &JsonValue,
    ) -> (Vec<ResponseCode>, Vec<ResponseContentType>) {
        let mut codes = Vec::new();
        let mut content_types = Vec::new();

        let responses = operation
            .get("responses")
            .and_then(JsonValue::as_object)
            .into_iter()
            .flatten();

        for (code, response) in responses {
            let resolved = response
                .get("$ref")
                .and_then(JsonValue::as_str)
                .and_then(|r| self.references.get(r))
                .unwrap_or(response);

            let description = response
                .get("description")
                .or_else(|| resolved.get("description"))
                .and_then(JsonValue::as_str)
                .map(|d| d.trim().to_string())
                .unwrap_or_default();
            codes.push(ResponseCode {
                code: code.clone(),
                description,
            });

            let is_success = code
                .parse::<u16>()
                .map(|c| (200..=299).contains(&c))
                .unwrap_or(false);
            if !is_success {
                continue;
            }
            if let Some(content) = resolved.get("content").and_then(JsonValue::as_object) {
                content_types.extend(content.keys().map(|ct| ResponseContentType {
                    content_type: ct.clone(),
                    code: code.clone(),
                }));
            }
        }

        (codes, content_types)
    }
}

/// Append a generated parameter, displacing any declared one with the same name
fn push_synthetic(list: &mut Vec<ParameterDescriptor>, synthetic: ParameterDescriptor) {
    list.retain(|p| {
        let clash = p.name.eq_ignore_ascii_case(&synthetic.name);
        if clash {
            warn!(parameter = %p.name, "declared parameter shadowed by generated one, dropping it");
        }
        !clash
    });
    list.push(synthetic);
}

fn normalize_content_type(content_type: &str) -> String {
    content_type.trim().to_lowercase()
}

/// Keep the first parameter for each case-insensitive name
fn dedupe_by_name(list: Vec<ParameterDescriptor>) -> Vec<ParameterDescriptor> {
    let mut seen = HashSet::new();
    list.into_iter()
        .filter(|p| seen.insert(p.name.to_lowercase()))
        .collect()
}

/// Stable partition: required parameters first, then optional ones
fn required_first(list: Vec<ParameterDescriptor>) -> Vec<ParameterDescriptor> {
    let (mut required, optional): (Vec<_>, Vec<_>) = list.into_iter().partition(|p| p.required);
    required.extend(optional);
    required
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;
    use crate::generation::rules::{REF_DB_BRANCH_NAME_PARAM, REF_WORKSPACE_ID_PARAM};
    use serde_json::json;
    use tracing_test::traced_test;

    fn spec() -> JsonValue {
        json!({
            "components": {
                "schemas": {
                    "TableName": { "type": "string" },
                    "PageSize": { "type": "integer", "default": 20 }
                },
                "parameters": {
                    "DBBranchNameParam": {
                        "name": "db_branch_name",
                        "in": "path",
                        "required": true,
                        "schema": { "type": "string" }
                    },
                    "WorkspaceIDParam": {
                        "name": "workspace_id",
                        "in": "path",
                        "required": true,
                        "schema": { "type": "string" }
                    },
                    "TableNameParam": {
                        "name": "table_name",
                        "in": "path",
                        "required": true,
                        "description": " The Table name ",
                        "schema": { "$ref": "#/components/schemas/TableName" }
                    }
                },
                "responses": {
                    "BadRequestError": {
                        "description": "Bad Request",
                        "content": { "application/json": {} }
                    },
                    "CsvResponse": {
                        "description": "OK",
                        "content": { "text/csv": {} }
                    }
                }
            }
        })
    }

    fn curate(params: JsonValue, operation: JsonValue) -> Result<CuratedParameters> {
        let table = ReferenceTable::resolve(&spec());
        let rules = ConvenienceRules::default();
        let curator = ParameterCurator::new(&table, &rules);
        curator.curate(params.as_array().unwrap(), &operation)
    }

    #[test]
    fn test_single_path_parameter() {
        let curated = curate(
            json!([{
                "name": "key_name",
                "in": "path",
                "required": true,
                "schema": { "type": "string" }
            }]),
            json!({ "operationId": "createUserAPIKey" }),
        )
        .unwrap();

        assert_eq!(curated.list.len(), 1);
        let p = &curated.list[0];
        assert_eq!(p.name, "key_name");
        assert_eq!(p.location, ParameterLocation::Path);
        assert!(p.required);
        assert_eq!(p.param_type, "str");
        assert_eq!(p.description, "");
        assert!(curated.has_path_params);
        assert!(!curated.has_optional_params);
        assert!(!curated.has_payload);
    }

    #[test]
    fn test_db_branch_name_substitution() {
        let curated = curate(
            json!([{ "$ref": REF_DB_BRANCH_NAME_PARAM }]),
            json!({}),
        )
        .unwrap();

        let names: Vec<_> = curated.list.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["db_name", "branch_name"]);
        assert!(curated.list.iter().all(|p| !p.required));
        assert!(curated.has_convenience(ConvenienceKind::DbBranchName));
        assert!(!curated.has_convenience(ConvenienceKind::WorkspaceId));
        assert!(curated.has_optional_params);
    }

    #[test]
    fn test_workspace_id_substitution() {
        let curated = curate(json!([{ "$ref": REF_WORKSPACE_ID_PARAM }]), json!({})).unwrap();
        assert_eq!(curated.list.len(), 1);
        assert_eq!(curated.list[0].name, "workspace_id");
        assert_eq!(curated.conveniences, vec![ConvenienceKind::WorkspaceId]);
    }

    #[test]
    fn test_apply_convenience_rules_is_pure() {
        let params = vec![
            json!({ "$ref": REF_DB_BRANCH_NAME_PARAM }),
            json!({ "$ref": "#/components/parameters/TableNameParam" }),
        ];
        let (sources, applied) = apply_convenience_rules(&params, &ConvenienceRules::default());
        assert_eq!(sources.len(), 3);
        assert!(matches!(sources[2], ParameterSource::Raw(_)));
        assert_eq!(applied, vec![ConvenienceKind::DbBranchName]);

        let (untouched, none) = apply_convenience_rules(&params, &ConvenienceRules::empty());
        assert_eq!(untouched.len(), 2);
        assert!(none.is_empty());
    }

    #[test]
    fn test_reference_resolution_follows_schema_ref() {
        let curated = curate(
            json!([{ "$ref": "#/components/parameters/TableNameParam" }]),
            json!({}),
        )
        .unwrap();
        let p = &curated.list[0];
        assert_eq!(p.name, "table_name");
        assert_eq!(p.param_type, "str");
        assert_eq!(p.description, "The Table name");
    }

    #[test]
    fn test_unresolved_parameter_reference_is_fatal() {
        let err = curate(
            json!([{ "$ref": "#/components/parameters/Missing" }]),
            json!({}),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ReferenceUnresolved);
        assert_eq!(err.exit_code(), 11);
    }

    #[test]
    fn test_unresolved_schema_reference_is_fatal() {
        let err = curate(
            json!([{
                "name": "size",
                "in": "query",
                "schema": { "$ref": "#/components/schemas/Missing" }
            }]),
            json!({}),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ReferenceUnresolved);
    }

    #[test]
    fn test_request_body_adds_single_required_payload() {
        let curated = curate(
            json!([{ "name": "payload", "in": "query", "schema": { "type": "string" } }]),
            json!({ "requestBody": { "content": { "application/json": {} } } }),
        )
        .unwrap();

        let payloads: Vec<_> = curated
            .list
            .iter()
            .filter(|p| p.name.eq_ignore_ascii_case("payload"))
            .collect();
        assert_eq!(payloads.len(), 1);
        assert!(payloads[0].required);
        assert_eq!(payloads[0].location, ParameterLocation::RequestBody);
        assert_eq!(payloads[0].param_type, "dict");
        assert!(curated.has_payload);
        assert!(!curated.has_query_params);

        let curated = curate(
            json!([]),
            json!({ "requestBody": { "content": { "application/json": {} } } }),
        )
        .unwrap();
        assert_eq!(curated.list.len(), 1);
        assert_eq!(curated.list[0].location, ParameterLocation::RequestBody);
        assert!(curated.list[0].required);
    }

    #[test]
    fn test_declared_selector_name_is_displaced() {
        let curated = curate(
            json!([{ "name": "Response_Content_Type", "in": "header", "required": true, "schema": { "type": "string" } }]),
            json!({
                "responses": {
                    "200": { "description": "OK", "content": { "text/csv": {}, "application/json": {} } }
                }
            }),
        )
        .unwrap();
        assert_eq!(curated.list.len(), 1);
        assert_eq!(curated.list[0].location, ParameterLocation::ResponseBody);
        assert!(!curated.has_header_params);
    }

    #[test]
    fn test_path_parameters_are_always_required() {
        let curated = curate(
            json!([
                { "name": "item_id", "in": "path", "schema": { "type": "string" } },
                { "name": "page", "in": "query", "schema": { "type": "integer" } }
            ]),
            json!({}),
        )
        .unwrap();
        assert!(curated.get("item_id").unwrap().required);
        assert!(!curated.get("page").unwrap().required);
        // convenience replacements stay optional
        let curated = curate(json!([{ "$ref": REF_DB_BRANCH_NAME_PARAM }]), json!({})).unwrap();
        assert!(curated.list.iter().all(|p| !p.required));
    }

    #[test]
    fn test_multiple_content_types_add_selector() {
        let curated = curate(
            json!([]),
            json!({
                "responses": {
                    "200": {
                        "description": "OK",
                        "content": { "Application/JSON ": {}, "text/csv": {} }
                    },
                    "400": { "$ref": "#/components/responses/BadRequestError" },
                    "5XX": { "description": "Unexpected Error" }
                }
            }),
        )
        .unwrap();

        assert!(curated.has_multiple_content_types);
        let selector = curated.get("response_content_type").unwrap();
        assert!(!selector.required);
        assert_eq!(selector.location, ParameterLocation::ResponseBody);
        assert_eq!(selector.default, Some(json!("application/json")));

        let codes: Vec<_> = curated.response_codes.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["200", "400", "5XX"]);
        assert_eq!(curated.response_codes[1].description, "Bad Request");
        assert_eq!(curated.response_content_types.len(), 2);
    }

    #[test]
    fn test_single_content_type_has_no_selector() {
        let curated = curate(
            json!([]),
            json!({
                "responses": {
                    "200": { "content": { "application/json": {} } },
                    "201": { "content": { "application/json": {} } },
                    "404": { "content": { "text/plain": {} } }
                }
            }),
        )
        .unwrap();
        assert!(!curated.has_multiple_content_types);
        assert!(curated.get("response_content_type").is_none());
        assert_eq!(curated.response_codes[0].description, "");
    }

    #[test]
    fn test_referenced_success_response_content_counts() {
        let curated = curate(
            json!([]),
            json!({
                "responses": {
                    "200": { "content": { "application/json": {} } },
                    "202": { "$ref": "#/components/responses/CsvResponse" }
                }
            }),
        )
        .unwrap();
        assert!(curated.has_multiple_content_types);
    }

    #[test]
    fn test_dedupe_and_required_first() {
        let curated = curate(
            json!([
                { "name": "columns", "in": "query", "schema": { "type": "array" } },
                { "name": "table_name", "in": "path", "required": true, "schema": { "type": "string" } },
                { "name": "Columns", "in": "query", "required": true, "schema": { "type": "string" } },
                { "name": "page", "in": "query", "schema": { "$ref": "#/components/schemas/PageSize" } },
                { "name": "id", "in": "path", "required": true, "schema": { "type": "string" } }
            ]),
            json!({}),
        )
        .unwrap();

        let names: Vec<_> = curated.list.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["table_name", "id", "columns", "page"]);

        let columns = curated.get("columns").unwrap();
        assert_eq!(columns.param_type, "list");
        assert!(!columns.required);

        let first_optional = curated.list.iter().position(|p| !p.required).unwrap();
        assert!(curated.list[first_optional..].iter().all(|p| !p.required));
        assert!(curated.has_query_params);
    }

    #[test]
    fn test_inline_default_is_carried() {
        let curated = curate(
            json!([{ "name": "size", "in": "query", "schema": { "type": "integer", "default": 20 } }]),
            json!({}),
        )
        .unwrap();
        assert_eq!(curated.list[0].default, Some(json!(20)));
        assert_eq!(curated.list[0].param_type, "int");
    }

    #[test]
    #[traced_test]
    fn test_untyped_schema_degrades_to_any() {
        let curated = curate(
            json!([{ "name": "filter", "in": "query", "schema": { "oneOf": [] } }]),
            json!({}),
        )
        .unwrap();
        assert_eq!(curated.list[0].param_type, "any");
        assert!(logs_contain("could not determine schema type"));
    }

    #[test]
    fn test_inline_parameter_without_name_is_invalid() {
        let err = curate(json!([{ "in": "query" }]), json!({})).unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidDocument(_)));
    }

    #[test]
    fn test_header_parameter_identifier() {
        let curated = curate(
            json!([{ "name": "X-Request-Id", "in": "header", "schema": { "type": "string" } }]),
            json!({}),
        )
        .unwrap();
        assert_eq!(curated.list[0].ident, "x_request_id");
        assert!(curated.has_header_params);
    }
}
