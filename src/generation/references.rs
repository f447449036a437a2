//! Reference table built from the document's `components`
//!
//! Every component is addressable by its canonical `group/name` key; full
//! `#/components/group/name` references are accepted on lookup.

use std::collections::HashMap;

use serde_json::Value as JsonValue;
use tracing::debug;

use crate::core::error::{GeneratorError, Result};
use crate::generation::rules::type_replacement;

const COMPONENTS_PREFIX: &str = "#/components/";

/// Flat lookup table from reference path to resolved definition
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    entries: HashMap<String, JsonValue>,
}

impl ReferenceTable {
    /// Walk all component groups and index every definition.
    ///
    /// Components carrying a string `type` have it normalized through the
    /// primitive substitution table.
    pub fn resolve(spec: &JsonValue) -> Self {
        let mut entries = HashMap::new();

        let groups = spec
            .get("components")
            .and_then(JsonValue::as_object)
            .into_iter()
            .flatten();

        for (group_name, group) in groups {
            let Some(group) = group.as_object() else {
                continue;
            };
            for (name, component) in group {
                let mut component = component.clone();
                if let Some(obj) = component.as_object_mut() {
                    if let Some(t) = obj.get("type").and_then(JsonValue::as_str) {
                        let normalized = type_replacement(t);
                        obj.insert("type".to_string(), JsonValue::String(normalized));
                    }
                }
                entries.insert(format!("{group_name}/{name}"), component);
            }
        }

        debug!(references = entries.len(), "Resolved component references");
        Self { entries }
    }

    /// Canonical key for a reference (`#/components/a/b` → `a/b`)
    pub fn canonical(reference: &str) -> &str {
        reference
            .strip_prefix(COMPONENTS_PREFIX)
            .unwrap_or(reference)
    }

    /// Look up a definition by canonical key or full reference
    pub fn get(&self, reference: &str) -> Option<&JsonValue> {
        self.entries.get(Self::canonical(reference))
    }

    /// Look up a definition, failing with `ReferenceUnresolved` when absent
    pub fn require(&self, reference: &str) -> Result<&JsonValue> {
        self.get(reference)
            .ok_or_else(|| GeneratorError::reference_unresolved(reference))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
