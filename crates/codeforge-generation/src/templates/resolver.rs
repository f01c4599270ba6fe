//! `{variable}` substitution over strings and nested JSON values

use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde_json::Value;

use crate::templates::context::TemplateContext;
use crate::templates::error::UnknownVariableError;

fn token_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("Invalid regex"))
}

/// Substitute every `{identifier}` token in `template`
///
/// All tokens are checked before anything is substituted, so a failure never
/// produces partial output. A template without tokens is returned unchanged.
///
/// # Errors
///
/// Returns [`UnknownVariableError`] naming the first token (left to right)
/// that `context` does not define.
pub fn interpolate(template: &str, context: &TemplateContext) -> Result<String, UnknownVariableError> {
    let regex = token_regex();

    for caps in regex.captures_iter(template) {
        let name = &caps[1];
        if !context.contains(name) {
            return Err(UnknownVariableError::new(name));
        }
    }

    let out = regex.replace_all(template, |caps: &Captures<'_>| {
        context
            .get(&caps[1])
            .map(value_to_string)
            .unwrap_or_default()
    });
    Ok(out.into_owned())
}

/// [`interpolate`] for callers that cannot propagate a `Result`
///
/// # Panics
///
/// Panics with the [`UnknownVariableError`] message when a token is not
/// defined by `context`.
pub fn interpolate_sync(template: &str, context: &TemplateContext) -> String {
    match interpolate(template, context) {
        Ok(out) => out,
        Err(e) => panic!("{e}"),
    }
}

/// Whether `s` contains at least one `{identifier}` token
pub fn has_interpolation(s: &str) -> bool {
    token_regex().is_match(s)
}

/// Identifiers referenced by `s`, de-duplicated, in first-occurrence order
pub fn extract_variables(s: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in token_regex().captures_iter(s) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Interpolate every string leaf of `value`
///
/// Object keys are left alone and non-string leaves are returned as they
/// are, so the result has exactly the shape of the input.
///
/// # Errors
///
/// Fails on the first leaf that references an undefined variable.
pub fn interpolate_deep(value: &Value, context: &TemplateContext) -> Result<Value, UnknownVariableError> {
    match value {
        Value::String(s) => Ok(Value::String(interpolate(s, context)?)),
        Value::Array(items) => items
            .iter()
            .map(|item| interpolate_deep(item, context))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Object(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (key, item) in map {
                out.insert(key.clone(), interpolate_deep(item, context)?);
            }
            Ok(Value::Object(out))
        }
        other => Ok(other.clone()),
    }
}

/// Text substituted for a context value
///
/// Strings are inserted verbatim; everything else uses its compact JSON form.
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
