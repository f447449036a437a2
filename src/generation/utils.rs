//! String transformation utilities for code generation
//!
//! These utilities belong in the generation domain as they are used
//! for transforming identifiers and file names during code generation.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::generation::rules::is_reserved_word;

static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z][^A-Z]*").expect("word boundary regex"));
static BRACES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[{}]").expect("braces regex"));

/// Converts a string to snake_case format for Rust identifiers.
///
/// Handles camelCase, PascalCase, kebab-case, and space-separated input.
///
/// # Examples
/// ```
/// use apigen::generation::utils::to_snake_case;
///
/// assert_eq!(to_snake_case("findPetsByStatus"), "find_pets_by_status");
/// assert_eq!(to_snake_case("find-pets-by-status"), "find_pets_by_status");
/// assert_eq!(to_snake_case("get HTTP Response"), "get_http_response");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let mut prev_is_lowercase = false;

    for ch in s.chars() {
        if ch.is_uppercase() {
            if prev_is_lowercase {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
            prev_is_lowercase = false;
        } else if ch.is_alphanumeric() {
            result.push(ch);
            prev_is_lowercase = ch.is_lowercase() || ch.is_ascii_digit();
        } else if (ch == '-' || ch == '_' || ch == ' ') && !result.ends_with('_') {
            result.push('_');
            prev_is_lowercase = false;
        }
    }

    result.trim_matches('_').to_string()
}

/// Derives a parameter identifier from its human-readable name.
///
/// The name is split on `[a-zA-Z][^A-Z]*` word boundaries, each word is
/// lower-cased with non-alphanumerics turned into `_`, and the words are joined
/// with `_`. Reserved words get a trailing `_`.
///
/// # Examples
/// ```
/// use apigen::generation::utils::param_ident;
///
/// assert_eq!(param_ident("workspaceId"), "workspace_id");
/// assert_eq!(param_ident("key_name"), "key_name");
/// assert_eq!(param_ident("type"), "type_");
/// ```
pub fn param_ident(name: &str) -> String {
    let ident = WORD_RE
        .find_iter(name)
        .map(|m| {
            m.as_str()
                .to_lowercase()
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
                .collect::<String>()
                .trim_matches('_')
                .to_string()
        })
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    if is_reserved_word(&ident) {
        format!("{ident}_")
    } else {
        ident
    }
}

/// Converts a string to a Rust function name, escaping reserved words.
pub fn fn_name(s: &str) -> String {
    let snake = to_snake_case(s);
    if is_reserved_word(&snake) {
        format!("{snake}_")
    } else {
        snake
    }
}

/// Type name from a display name: words split on spaces, stripped to
/// alphanumerics, capitalized, joined.
///
/// # Examples
/// ```
/// use apigen::generation::utils::type_name;
///
/// assert_eq!(type_name("API Keys"), "ApiKeys");
/// assert_eq!(type_name("API Keys (beta)"), "ApiKeysBeta");
/// assert_eq!(type_name("Authentication"), "Authentication");
/// ```
pub fn type_name(display_name: &str) -> String {
    display_name
        .to_lowercase()
        .split(' ')
        .map(|word| {
            let word: String = word.chars().filter(|c| c.is_alphanumeric()).collect();
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect()
}

/// File stem for a namespace: lower-cased with spaces replaced by `_`.
pub fn sanitize_filename(name: &str) -> String {
    name.replace(' ', "_").to_lowercase()
}

/// Documentation link for an endpoint.
///
/// Braces are stripped from the path; the summary is lower-cased with spaces
/// turned into hyphens and used as the fragment.
pub fn docs_url(base: &str, path: &str, summary: &str) -> String {
    format!(
        "{base}{}#{}",
        BRACES_RE.replace_all(path.trim(), ""),
        summary.to_lowercase().replace(' ', "-")
    )
}
