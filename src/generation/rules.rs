//! Business rules for the generation domain
//!
//! Static tables compiled into the generator: type substitutions, reserved
//! words, the default template, and the convenience-parameter rules.

use crate::generation::{ConvenienceKind, ParameterDescriptor, ParameterLocation};

/// Template used when no rename entry picks another one
pub const DEFAULT_TEMPLATE: &str = "endpoint";

/// Shared reference expanded into `db_name` + `branch_name`
pub const REF_DB_BRANCH_NAME_PARAM: &str = "#/components/parameters/DBBranchNameParam";

/// Shared reference expanded into an optional `workspace_id`
pub const REF_WORKSPACE_ID_PARAM: &str = "#/components/parameters/WorkspaceIDParam";

/// Primitive type names and their normalized form
pub const TYPE_REPLACEMENTS: &[(&str, &str)] = &[
    ("integer", "int"),
    ("boolean", "bool"),
    ("array", "list"),
    ("object", "dict"),
    ("string", "str"),
];

/// Identifiers that need a trailing `_` in generated code
pub const RESERVED_WORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "try",
    "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final",
    "gen", "macro", "override", "priv", "typeof", "unsized", "virtual", "yield",
];

/// Normalize a primitive type name through [`TYPE_REPLACEMENTS`].
pub fn type_replacement(t: &str) -> String {
    let orig = t.trim().to_lowercase();
    TYPE_REPLACEMENTS
        .iter()
        .find(|(from, _)| *from == orig)
        .map(|(_, to)| to.to_string())
        .unwrap_or(orig)
}

/// Whether an identifier collides with a reserved word
pub fn is_reserved_word(ident: &str) -> bool {
    RESERVED_WORDS.contains(&ident)
}

/// Replacement of one shared parameter reference
#[derive(Debug, Clone)]
pub struct ConvenienceRule {
    pub reference: String,
    pub kind: ConvenienceKind,
    pub replacements: Vec<ParameterDescriptor>,
}

/// Declarative `{reference -> [replacement, ...]}` table
#[derive(Debug, Clone)]
pub struct ConvenienceRules {
    rules: Vec<ConvenienceRule>,
}

impl ConvenienceRules {
    pub fn new(rules: Vec<ConvenienceRule>) -> Self {
        Self { rules }
    }

    /// Table with no substitutions
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Rule matching a `$ref`, if any
    pub fn find(&self, reference: &str) -> Option<&ConvenienceRule> {
        self.rules.iter().find(|r| r.reference == reference)
    }
}

impl Default for ConvenienceRules {
    fn default() -> Self {
        Self::new(vec![
            ConvenienceRule {
                reference: REF_DB_BRANCH_NAME_PARAM.to_string(),
                kind: ConvenienceKind::DbBranchName,
                replacements: vec![
                    optional_path_param(
                        "db_name",
                        "The name of the database to query. Default: database name from the client.",
                    ),
                    optional_path_param(
                        "branch_name",
                        "The name of the branch to query. Default: branch name from the client.",
                    ),
                ],
            },
            ConvenienceRule {
                reference: REF_WORKSPACE_ID_PARAM.to_string(),
                kind: ConvenienceKind::WorkspaceId,
                replacements: vec![optional_path_param(
                    "workspace_id",
                    "The workspace identifier. Default: workspace Id from the client.",
                )],
            },
        ])
    }
}

fn optional_path_param(name: &str, description: &str) -> ParameterDescriptor {
    ParameterDescriptor {
        name: name.to_string(),
        ident: name.to_string(),
        location: ParameterLocation::Path,
        param_type: "str".to_string(),
        required: false,
        description: description.to_string(),
        default: None,
    }
}

/// Synthetic parameter carrying the request body
pub fn payload_parameter() -> ParameterDescriptor {
    ParameterDescriptor {
        name: "payload".to_string(),
        ident: "payload".to_string(),
        location: ParameterLocation::RequestBody,
        param_type: "dict".to_string(),
        required: true,
        description: "content".to_string(),
        default: None,
    }
}

/// Synthetic parameter selecting one of several response content types
pub fn response_content_type_parameter(default_content_type: &str) -> ParameterDescriptor {
    ParameterDescriptor {
        name: "response_content_type".to_string(),
        ident: "response_content_type".to_string(),
        location: ParameterLocation::ResponseBody,
        param_type: "str".to_string(),
        required: false,
        description: format!("Content type of the response. Default: {default_content_type}"),
        default: Some(serde_json::Value::String(default_content_type.to_string())),
    }
}
