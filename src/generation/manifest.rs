//! Per-scope manifest of every emitted endpoint

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use sha2::{Digest, Sha256};

use crate::core::error::Result;
use crate::generation::EndpointManifestEntry;

/// Version of this generator, recorded in every manifest
pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub scope: String,
    pub version_spec: String,
    pub version_codegen: String,
    pub checksum: String,
    pub generated_on: String,
    pub base_url: String,
    pub endpoints: Vec<EndpointManifestEntry>,
}

impl Manifest {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Accumulates endpoint entries during one scope run
#[derive(Debug)]
pub struct ManifestBuilder {
    scope: String,
    version_spec: String,
    checksum: String,
    base_url: String,
    endpoints: Vec<EndpointManifestEntry>,
}

impl ManifestBuilder {
    pub fn new(
        scope: impl Into<String>,
        version_spec: impl Into<String>,
        checksum: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            scope: scope.into(),
            version_spec: version_spec.into(),
            checksum: checksum.into(),
            base_url: base_url.into(),
            endpoints: Vec::new(),
        }
    }

    pub fn push_endpoint(&mut self, entry: EndpointManifestEntry) {
        self.endpoints.push(entry);
    }

    pub fn endpoints(&self) -> &[EndpointManifestEntry] {
        &self.endpoints
    }

    /// Finish the manifest, stamping it with the current UTC time
    pub fn build(self) -> Manifest {
        Manifest {
            scope: self.scope,
            version_spec: self.version_spec,
            version_codegen: GENERATOR_VERSION.to_string(),
            checksum: self.checksum,
            generated_on: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            base_url: self.base_url,
            endpoints: self.endpoints,
        }
    }
}

/// Copy of `value` with every object's keys sorted, recursively
pub fn canonicalize(value: &JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let sorted: Map<String, JsonValue> = keys
                .into_iter()
                .map(|k| (k.clone(), canonicalize(&map[k])))
                .collect();
            JsonValue::Object(sorted)
        }
        JsonValue::Array(items) => JsonValue::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

/// SHA-256 hex digest of the document serialized with sorted keys.
///
/// Independent of the key order of the source document.
pub fn checksum(spec: &JsonValue) -> Result<String> {
    let serialized = serde_json::to_vec(&canonicalize(spec))?;
    Ok(hex::encode(Sha256::digest(&serialized)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{EndpointStatus, ResponseCode};
    use chrono::DateTime;
    use serde_json::json;

    #[test]
    fn test_checksum_ignores_key_order() {
        let a: JsonValue =
            serde_json::from_str(r#"{"info": {"version": "1.0", "title": "x"}, "paths": {}}"#)
                .unwrap();
        let b: JsonValue =
            serde_json::from_str(r#"{"paths": {}, "info": {"title": "x", "version": "1.0"}}"#)
                .unwrap();
        assert_eq!(checksum(&a).unwrap(), checksum(&b).unwrap());

        let c = json!({"paths": {}, "info": {"title": "y", "version": "1.0"}});
        assert_ne!(checksum(&a).unwrap(), checksum(&c).unwrap());
    }

    #[test]
    fn test_checksum_is_sha256_hex() {
        let sum = checksum(&json!({})).unwrap();
        assert_eq!(sum.len(), 64);
        // sha256("{}")
        assert_eq!(
            sum,
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
    }

    #[test]
    fn test_canonicalize_sorts_nested_objects_in_arrays() {
        let value = canonicalize(&json!([{"b": 1, "a": 2}]));
        let keys: Vec<_> = value[0].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_builder() {
        let mut builder = ManifestBuilder::new("core", "1.0", "abc", "https://api.xata.io");
        builder.push_endpoint(EndpointManifestEntry {
            namespace: "Authentication".to_string(),
            name: "Get the list of user API keys".to_string(),
            operation_id: "getUserAPIKeys".to_string(),
            generated_name: "get_user_apikeys".to_string(),
            description: "Retrieve a list of existing user API keys".to_string(),
            method: "GET".to_string(),
            url_path: "/user/keys".to_string(),
            responses: vec![ResponseCode {
                code: "200".to_string(),
                description: "OK".to_string(),
            }],
            status: EndpointStatus::Ga,
            parameters: vec![],
        });
        assert_eq!(builder.endpoints().len(), 1);

        let manifest = builder.build();
        assert_eq!(manifest.version_codegen, GENERATOR_VERSION);
        assert!(DateTime::parse_from_rfc3339(&manifest.generated_on).is_ok());
        assert!(manifest.generated_on.ends_with('Z'));

        let value: JsonValue = serde_json::from_str(&manifest.to_json_pretty().unwrap()).unwrap();
        assert_eq!(value["scope"], "core");
        assert_eq!(value["endpoints"][0]["status"], "GA");
        assert_eq!(value["endpoints"][0]["method"], "GET");
    }
}
