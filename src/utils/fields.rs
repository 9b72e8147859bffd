//! Lenient field extraction from loosely-typed JSON objects.

use serde_json::Value;

/// Returns the first usable text value among `keys`, in order.
///
/// Strings are trimmed, numbers and booleans are rendered as text. Empty strings,
/// `null`, arrays and objects count as absent so the next alias is tried.
pub fn text_field(source: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| source.get(*key).and_then(as_text))
}

fn as_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if text.is_empty() { None } else { Some(text) }
}

/// Reads a boolean flag, accepting `true`/`false` and their string forms.
pub fn flag_field(source: &Value, key: &str) -> bool {
    match source.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}
