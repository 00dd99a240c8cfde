//! Turning raw secret strings into output variables.
//!
//! A secret is either flattened into many variables (JSON objects and
//! arrays) or reduced to a single scalar value.

use serde_json::Value;
use tracing::trace;

use crate::core::constants::EXPANSION_SEPARATOR;
use crate::core::domain::Variables;
use crate::core::json_path;
use crate::error::PathError;

/// Why a requested key could not be read from a secret
#[derive(Debug)]
pub enum ExtractError {
    NotJson,
    Path(PathError),
}

/// Remove control and whitespace characters, keeping plain spaces.
pub fn clean_control_chars(s: &str) -> String {
    s.chars()
        .filter(|&c| c == ' ' || !(c.is_control() || c.is_whitespace()))
        .collect()
}

/// Remove one matching pair of surrounding `"` or `'`.
pub fn unwrap_quotes(s: &str) -> &str {
    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// Text form of a JSON value.
///
/// Strings are returned without quotes; objects and arrays as compact JSON.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Join a prefix and a member name or index.
pub fn join_key(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}{}{}", prefix, EXPANSION_SEPARATOR, name)
    }
}

/// Flatten a JSON value into `vars` under `prefix`.
///
/// Object members are visited in sorted order; array elements are keyed by
/// their 0-based index. Scalars are stored under `prefix` itself.
pub fn expand_json(prefix: &str, value: &Value, vars: &mut Variables) {
    match value {
        Value::Object(map) => {
            let mut names: Vec<&String> = map.keys().collect();
            names.sort();
            for name in names {
                expand_json(&join_key(prefix, name), &map[name.as_str()], vars);
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                expand_json(&join_key(prefix, &i.to_string()), item, vars);
            }
        }
        leaf => vars.insert(prefix, stringify(leaf)),
    }
}

/// Expand a raw secret into variables.
///
/// JSON objects and arrays are flattened. A JSON scalar or a non-JSON secret
/// becomes one variable named `prefix`, or `fallback_key` when the prefix is
/// empty.
pub fn expand_secret(prefix: &str, fallback_key: &str, raw: &str) -> Variables {
    let mut vars = Variables::new();
    let key = if prefix.is_empty() { fallback_key } else { prefix };

    match serde_json::from_str::<Value>(raw) {
        Ok(value @ (Value::Object(_) | Value::Array(_))) => {
            expand_json(prefix, &value, &mut vars);
        }
        Ok(scalar) => vars.insert(key, stringify(&scalar)),
        Err(_) => {
            trace!(key, "secret is not JSON, storing as a single value");
            vars.insert(key, raw);
        }
    }

    vars
}

/// Reduce a raw secret to one cleaned value.
///
/// With `key`, the secret is parsed as JSON and the dotted path is followed.
/// The result has control characters stripped and one quote layer removed.
///
/// # Errors
///
/// Returns `ExtractError::NotJson` when a key is requested from a non-JSON
/// secret, and `ExtractError::Path` when the path does not resolve.
pub fn extract_scalar(raw: &str, key: Option<&str>) -> Result<String, ExtractError> {
    let text = match key {
        None => clean_control_chars(raw),
        Some(key) => {
            let root: Value = serde_json::from_str(raw).map_err(|_| ExtractError::NotJson)?;
            let found =
                json_path::navigate(&root, &json_path::split_path(key)).map_err(ExtractError::Path)?;
            match found {
                Value::String(s) => clean_control_chars(s),
                other => stringify(other),
            }
        }
    };

    Ok(unwrap_quotes(&text).to_string())
}
