//! The request binder: combines the JSON body, the query string, and
//! matched path parameters into the target record.

use std::collections::HashMap;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use truss_core::model::{HttpMethod, JsonKind};
use truss_core::RpcError;

/// A dotted path/query key paired with the JSON kind its target field
/// declares, so the binder knows how to read a raw string instead of
/// guessing from its syntax. Generated handlers pass one entry per
/// leaf-bindable field of the request record, nested fields flattened
/// with `.` the same way their query keys are.
pub type BindingSchema<'a> = &'a [(&'a str, JsonKind)];

/// Everything a generated handler needs to bind an incoming request onto
/// its typed request record.
#[derive(Debug, Clone)]
pub struct IncomingRequest {
    method: HttpMethod,
    body: Bytes,
    query: Vec<(String, String)>,
    path_params: HashMap<String, String>,
}

impl IncomingRequest {
    pub fn new(
        method: HttpMethod,
        body: Bytes,
        query: Vec<(String, String)>,
        path_params: HashMap<String, String>,
    ) -> Self {
        Self {
            method,
            body,
            query,
            path_params,
        }
    }

    /// Bind the three sources onto `T`, later sources overriding earlier
    /// ones: body, then query string, then path parameters — path always
    /// wins when the same field is specified by more than one source.
    ///
    /// `schema` declares the JSON kind of each leaf-bindable field by its
    /// dotted key, so a field whose declared type is a string is never
    /// coerced into a number or boolean just because its raw value looks
    /// like one. Keys absent from `schema` fall back to guessing the kind
    /// from the raw string's own syntax.
    pub fn bind<T: DeserializeOwned>(&self, schema: BindingSchema) -> Result<T, RpcError> {
        let mut value = self.body_value()?;
        for (key, raw) in &self.query {
            merge_nested(&mut value, key, leaf_value(key, raw, schema));
        }
        for (key, raw) in &self.path_params {
            merge_nested(&mut value, key, leaf_value(key, raw, schema));
        }
        serde_json::from_value(value).map_err(|e| RpcError::bad_request(format!("failed to bind request: {e}")))
    }

    fn body_value(&self) -> Result<Value, RpcError> {
        if !self.method.is_body_carrying() || self.body.is_empty() {
            return Ok(Value::Object(Map::new()));
        }
        serde_json::from_slice(&self.body).map_err(|e| RpcError::bad_request(format!("invalid JSON body: {e}")))
    }
}

/// Resolve `key`'s declared JSON kind from `schema`, falling back to
/// syntax-guessing for keys the schema doesn't cover (additional query
/// parameters with no corresponding field, or a schema the caller left
/// empty).
fn leaf_value(key: &str, raw: &str, schema: BindingSchema) -> Value {
    match schema.iter().find(|(k, _)| *k == key).map(|(_, kind)| *kind) {
        Some(JsonKind::String) => Value::String(raw.to_string()),
        Some(JsonKind::Boolean) => match raw {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => Value::String(raw.to_string()),
        },
        Some(JsonKind::Number) => raw
            .parse::<i64>()
            .map(|i| Value::Number(i.into()))
            .ok()
            .or_else(|| raw.parse::<f64>().ok().and_then(serde_json::Number::from_f64).map(Value::Number))
            .unwrap_or_else(|| Value::String(raw.to_string())),
        // Array/Object can't arrive as a single path/query string; fall
        // through to guessing rather than force a value that will fail
        // deserialization either way.
        Some(JsonKind::Array) | Some(JsonKind::Object) | None => guess_leaf_value(raw),
    }
}

/// Parse a raw path/query string into the JSON scalar it most plausibly
/// represents — boolean, then integer, then float, falling back to a
/// plain string. Never produces an array or object: a caller needing a
/// complex value on a non-body-carrying method must switch to a
/// body-carrying one.
fn guess_leaf_value(raw: &str) -> Value {
    if raw == "true" {
        return Value::Bool(true);
    }
    if raw == "false" {
        return Value::Bool(false);
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Value::Number(i.into());
    }
    if let Ok(f) = raw.parse::<f64>() {
        if let Some(n) = serde_json::Number::from_f64(f) {
            return Value::Number(n);
        }
    }
    Value::String(raw.to_string())
}

/// Walk `value` along `key`'s `.`-separated path, creating nested
/// objects as needed, and set the final segment to `leaf`. If the walk
/// ever meets a non-object value the key is silently abandoned.
fn merge_nested(value: &mut Value, key: &str, leaf: Value) {
    let parts: Vec<&str> = key.split('.').collect();
    let mut cursor = value;
    for (i, part) in parts.iter().enumerate() {
        let Some(obj) = cursor.as_object_mut() else {
            return;
        };
        if i == parts.len() - 1 {
            obj.insert((*part).to_string(), leaf);
            return;
        }
        cursor = obj.entry((*part).to_string()).or_insert_with(|| Value::Object(Map::new()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Page {
        limit: i64,
        offset: i64,
        order: String,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct SearchRequest {
        page: Page,
    }

    const SEARCH_SCHEMA: BindingSchema = &[
        ("page.limit", JsonKind::Number),
        ("page.offset", JsonKind::Number),
        ("page.order", JsonKind::String),
    ];

    #[test]
    fn nested_query_keys_bind_into_a_nested_record() {
        let request = IncomingRequest::new(
            HttpMethod::Get,
            Bytes::new(),
            vec![
                ("page.limit".into(), "42".into()),
                ("page.offset".into(), "3".into()),
                ("page.order".into(), "desc".into()),
            ],
            HashMap::new(),
        );
        let bound: SearchRequest = request.bind(SEARCH_SCHEMA).unwrap();
        assert_eq!(
            bound,
            SearchRequest {
                page: Page {
                    limit: 42,
                    offset: 3,
                    order: "desc".into(),
                },
            }
        );
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct AddRequest {
        a: i64,
        b: i64,
    }

    const ADD_SCHEMA: BindingSchema = &[("a", JsonKind::Number), ("b", JsonKind::Number)];

    #[test]
    fn unknown_keys_are_silently_skipped() {
        let mut query = vec![("a".to_string(), "5".to_string()), ("b".to_string(), "2".to_string())];
        query.push(("c".to_string(), "99".to_string()));
        let request = IncomingRequest::new(HttpMethod::Get, Bytes::new(), query, HashMap::new());
        let bound: AddRequest = request.bind(ADD_SCHEMA).unwrap();
        assert_eq!(bound, AddRequest { a: 5, b: 2 });
    }

    #[test]
    fn path_parameters_override_query_and_body() {
        let body = Bytes::from(serde_json::to_vec(&serde_json::json!({"a": 1, "b": 1})).unwrap());
        let request = IncomingRequest::new(
            HttpMethod::Post,
            body,
            vec![("a".to_string(), "2".to_string())],
            HashMap::from([("a".to_string(), "3".to_string())]),
        );
        let bound: AddRequest = request.bind(ADD_SCHEMA).unwrap();
        assert_eq!(bound, AddRequest { a: 3, b: 1 });
    }

    #[test]
    fn body_is_ignored_for_non_body_carrying_methods() {
        let body = Bytes::from(serde_json::to_vec(&serde_json::json!({"a": 9, "b": 9})).unwrap());
        let request = IncomingRequest::new(
            HttpMethod::Get,
            body,
            vec![("a".to_string(), "1".to_string()), ("b".to_string(), "2".to_string())],
            HashMap::new(),
        );
        let bound: AddRequest = request.bind(ADD_SCHEMA).unwrap();
        assert_eq!(bound, AddRequest { a: 1, b: 2 });
    }

    #[test]
    fn leaf_values_are_guessed_as_bool_int_float_then_string_without_a_schema() {
        assert_eq!(guess_leaf_value("true"), Value::Bool(true));
        assert_eq!(guess_leaf_value("42"), Value::Number(42.into()));
        assert_eq!(guess_leaf_value("desc"), Value::String("desc".into()));
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct ZipRequest {
        zip: String,
    }

    #[test]
    fn a_string_field_keeps_an_all_digit_value_as_a_string() {
        let request = IncomingRequest::new(
            HttpMethod::Get,
            Bytes::new(),
            vec![("zip".to_string(), "02139".to_string())],
            HashMap::new(),
        );
        let bound: ZipRequest = request.bind(&[("zip", JsonKind::String)]).unwrap();
        assert_eq!(bound, ZipRequest { zip: "02139".into() });
    }
}
