//! Custom tera filters used by the built-in templates
//!
//! Parameter filters receive objects with at least `ident`, `type` and
//! `required` fields.

use std::collections::HashMap;

use tera::{Tera, Value, to_value, try_get_value};

use crate::generation::sanitizers::sanitize_doc_line;
use crate::generation::utils;

/// Register every filter on a tera instance.
///
/// The built-in templates receive a ready `fn_name` (renames already applied);
/// the `fn_name` filter is there for override templates deriving their own
/// names from `operation_id`.
pub fn register_filters(tera: &mut Tera) {
    tera.register_filter("fn_name", fn_name);
    tera.register_filter("rust_type", rust_type);
    tera.register_filter("query_value", query_value);
    tera.register_filter("doc_line", doc_line);
}

/// Rust type spelled for a semantic type name
pub fn rust_type_for(param_type: &str, required: bool) -> String {
    let base = match param_type {
        "str" => "&str",
        "int" => "i64",
        "number" => "f64",
        "bool" => "bool",
        "list" => "&[&str]",
        _ => "serde_json::Value",
    };
    if required {
        base.to_string()
    } else {
        format!("Option<{base}>")
    }
}

/// Expression turning a bound parameter into a query or header value
pub fn query_value_for(param_type: &str, ident: &str) -> String {
    match param_type {
        "str" => ident.to_string(),
        "list" => format!("{ident}.join(\",\")"),
        _ => format!("{ident}.to_string()"),
    }
}

fn field<'a>(value: &'a Value, key: &str, filter: &str) -> tera::Result<&'a Value> {
    value
        .get(key)
        .ok_or_else(|| tera::Error::msg(format!("`{filter}` expects a parameter with `{key}`")))
}

fn fn_name(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = try_get_value!("fn_name", "value", String, value);
    Ok(to_value(utils::fn_name(&s))?)
}

fn rust_type(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let param_type = field(value, "type", "rust_type")?.as_str().unwrap_or("any");
    let required = field(value, "required", "rust_type")?
        .as_bool()
        .unwrap_or(false);
    Ok(to_value(rust_type_for(param_type, required))?)
}

fn query_value(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let param_type = field(value, "type", "query_value")?.as_str().unwrap_or("any");
    let ident = field(value, "ident", "query_value")?
        .as_str()
        .ok_or_else(|| tera::Error::msg("`query_value` expects a string `ident`"))?;
    Ok(to_value(query_value_for(param_type, ident))?)
}

fn doc_line(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = try_get_value!("doc_line", "value", String, value);
    Ok(to_value(sanitize_doc_line(&s))?)
}
