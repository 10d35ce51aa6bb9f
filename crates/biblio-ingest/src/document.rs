//! Traversal helpers over parsed export documents
//!
//! Exports arrive as untyped JSON trees whose nesting differs per vendor, so
//! every lookup here is total: a missing key, a wrong node type or an empty
//! value all resolve to `None` and the caller picks the default.

use serde_json::{Map, Value};

/// Resolve a dotted path such as `"coredata.dc:title"`.
///
/// Descends one key per segment. Stops with `None` as soon as a segment is
/// missing or the current node is not a mapping.
pub fn get_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |node, key| match node {
        Value::Object(map) => map.get(key),
        Value::Null
        | Value::Bool(_)
        | Value::Number(_)
        | Value::String(_)
        | Value::Array(_) => None,
    })
}

/// Whether a candidate value counts as present for priority-fallback
/// extraction. Null, `false`, zero, `""`, `[]` and `{}` do not.
pub fn is_populated(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// First populated value among `paths`, tried left to right.
pub fn first_populated<'a>(value: &'a Value, paths: &[&str]) -> Option<&'a Value> {
    paths
        .iter()
        .filter_map(|path| get_path(value, path))
        .find(|candidate| is_populated(candidate))
}

/// Flat text for a scalar node. Sequences and mappings have none.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// First populated scalar among `paths`, rendered as text.
///
/// A populated candidate that is a sequence or mapping is passed over so the
/// next path gets its chance.
pub fn first_text(value: &Value, paths: &[&str]) -> Option<String> {
    paths
        .iter()
        .filter_map(|path| get_path(value, path))
        .filter(|candidate| is_populated(candidate))
        .find_map(scalar_text)
}

/// Same as [`first_text`] but over the direct keys of one mapping.
pub fn first_key_text(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| map.get(*key))
        .filter(|candidate| is_populated(candidate))
        .find_map(scalar_text)
}

/// Integer reading of a node: JSON integers, truncated floats, or strings
/// holding an integer (Scopus writes counts as strings).
pub fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}
