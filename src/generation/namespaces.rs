//! Namespace pruning: keep only tags that own at least one operation.

use std::collections::HashMap;

use serde_json::{Map, Value as JsonValue};
use tracing::warn;

use crate::core::error::Result;
use crate::generation::{HttpMethod, Namespace};

/// Read the document's `tags` list as namespaces, in document order.
pub fn namespaces_from_spec(spec: &JsonValue) -> Result<Vec<Namespace>> {
    spec.get("tags")
        .and_then(JsonValue::as_array)
        .map(|tags| tags.iter().map(Namespace::from_tag).collect())
        .unwrap_or_else(|| Ok(Vec::new()))
}

/// First tag of an operation, which names its owning namespace
pub fn operation_namespace(operation: &JsonValue) -> Option<&str> {
    operation
        .get("tags")
        .and_then(JsonValue::as_array)
        .and_then(|tags| tags.first())
        .and_then(JsonValue::as_str)
}

/// Filter `tags` down to those with at least one bound operation.
///
/// Operations are counted per first tag across the supported HTTP methods.
/// Relative order of the surviving tags is preserved.
pub fn prune_empty_namespaces(
    tags: &[Namespace],
    paths: &Map<String, JsonValue>,
) -> Vec<Namespace> {
    let mut counts: HashMap<&str, usize> =
        tags.iter().map(|t| (t.name.as_str(), 0)).collect();

    for (path, item) in paths {
        for method in HttpMethod::all() {
            let Some(operation) = item.get(method.as_str()) else {
                continue;
            };
            match operation_namespace(operation) {
                Some(tag) => match counts.get_mut(tag) {
                    Some(count) => *count += 1,
                    None => warn!(path = %path, method = %method, tag, "operation tagged with undeclared tag"),
                },
                None => warn!(path = %path, method = %method, "operation without tags"),
            }
        }
    }

    tags.iter()
        .filter(|t| counts.get(t.name.as_str()).copied().unwrap_or(0) > 0)
        .cloned()
        .collect()
}
