//! Output formatting.
//!
//! Renders variables as sorted `KEY=value` lines, optionally quoted or as
//! shell `export` statements.

use serde_json::Value;
use tracing::warn;

use crate::core::domain::address::is_address;
use crate::core::domain::Variables;
use crate::core::expand::unwrap_quotes;

/// How variables are written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Wrap values in single quotes
    pub use_quotes: bool,
    /// Emit `export KEY='value'` lines
    pub export: bool,
    /// Keep variables whose name is a secret address
    pub include_addresses: bool,
    /// Re-serialize JSON object and array values without whitespace
    pub compact_json: bool,
    /// Keys to place first before sorting
    pub preferred_order: Vec<String>,
}

/// Format variables into lines, one per variable, sorted by key.
///
/// In export form, keys that are not shell identifiers are skipped with a
/// warning so the output stays safe to `eval`.
pub fn format(vars: &Variables, options: &FormatOptions) -> Vec<String> {
    order_keys(vars, &options.preferred_order)
        .into_iter()
        .filter(|key| options.include_addresses || !is_address(key))
        .filter(|key| !options.export || exportable(key))
        .filter_map(|key| vars.get(key).map(|value| format_line(key, value, options)))
        .collect()
}

/// Whether `key` is a valid shell variable name (`[A-Za-z_][A-Za-z0-9_]*`).
pub fn is_shell_name(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

fn exportable(key: &str) -> bool {
    let ok = is_shell_name(key);
    if !ok {
        warn!(key = %key.escape_debug(), "skipping variable that is not a valid shell name");
    }
    ok
}

/// Join formatted lines with newlines.
pub fn render(lines: &[String]) -> String {
    lines.join("\n")
}

/// Format a single variable.
pub fn format_line(key: &str, value: &str, options: &FormatOptions) -> String {
    let value = unwrap_quotes(value);
    let value = if options.compact_json {
        compact_json(value).unwrap_or_else(|| value.to_string())
    } else {
        value.to_string()
    };

    if options.export {
        format!("export {}='{}'", key, escape_single_quotes(&value))
    } else if options.use_quotes {
        format!("{}='{}'", key, value)
    } else {
        format!("{}={}", key, value)
    }
}

/// Escape `'` for use inside a single-quoted shell string.
pub fn escape_single_quotes(value: &str) -> String {
    value.replace('\'', r"'\''")
}

fn compact_json(value: &str) -> Option<String> {
    match serde_json::from_str::<Value>(value).ok()? {
        v @ (Value::Object(_) | Value::Array(_)) => Some(v.to_string()),
        _ => None,
    }
}

// Preferred keys first, then the rest; the final order is always sorted so
// output does not depend on insertion order.
fn order_keys<'a>(vars: &'a Variables, preferred: &'a [String]) -> Vec<&'a str> {
    let mut keys: Vec<&str> = preferred
        .iter()
        .map(String::as_str)
        .filter(|k| vars.contains_key(k))
        .chain(vars.keys())
        .collect();
    keys.sort_unstable();
    keys.dedup();
    keys
}
