//! URL construction: substitute path parameters out of a request's
//! serialized fields, and render whatever remains as a query string.

use serde_json::{Map, Value};

/// Walk `path_pattern`'s `/`-separated segments. A segment beginning
/// with `:` is replaced by the value of the field whose transport name
/// matches it case-insensitively, and that field is removed from
/// `fields` so later query-string construction doesn't also emit it.
/// Literal segments are left alone; an unmatched `:name` segment is
/// emitted verbatim, matching the corresponding gateway-side behavior of
/// leaving an unresolved path parameter unbound.
pub fn substitute_path_params(path_pattern: &str, fields: &mut Map<String, Value>) -> String {
    path_pattern
        .split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) => {
                let matched_key = fields.keys().find(|k| k.eq_ignore_ascii_case(name)).cloned();
                match matched_key.and_then(|key| fields.remove(&key)) {
                    Some(value) => scalar_to_text(&value),
                    None => segment.to_string(),
                }
            }
            None => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Render the fields left over after path substitution as a query
/// string. Nested objects flatten to dotted keys, mirroring the
/// gateway's nested-key binder; arrays are never expressible in a
/// non-body-carrying call, so they're dropped rather than mis-encoded.
pub fn query_string(fields: &Map<String, Value>) -> Option<String> {
    let mut pairs = Vec::new();
    for (key, value) in fields {
        collect_pairs(key, value, &mut pairs);
    }
    if pairs.is_empty() {
        return None;
    }
    Some(
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish(),
    )
}

fn collect_pairs(key: &str, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (child_key, child_value) in map {
                collect_pairs(&format!("{key}.{child_key}"), child_value, pairs);
            }
        }
        Value::Array(_) | Value::Null => {}
        other => pairs.push((key.to_string(), scalar_to_text(other))),
    }
}

fn scalar_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
