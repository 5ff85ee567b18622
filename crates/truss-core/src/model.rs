//! The contract model: the rooted, immutable-after-build tree produced by
//! the extractor (`truss-parse`) and consumed by the generator
//! (`truss-codegen`) and the runtime (`truss-gateway`, `truss-client`).
//!
//! Nothing in this module parses source or performs I/O; it is the shared
//! vocabulary every other `truss` crate builds on.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root of a parsed contract. Produced once per input file and then
/// treated as read-only for the rest of its lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Context {
    pub module: Module,
    pub input_package: Package,
    pub output_package: Package,
    pub services: Vec<Service>,
    pub records: Vec<Record>,
    pub docs: DocIndex,
    pub tags: TagIndex,
    /// Unix timestamp (seconds) of when this Context was built.
    pub built_at: i64,
}

impl Context {
    /// Look up a record by name. Every Function's request/response type
    /// is guaranteed (by the extractor's validation pass) to resolve here.
    pub fn record(&self, name: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn service(&self, name: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.name == name)
    }
}

/// The logical module a source file belongs to, discovered by walking
/// parent directories until a module manifest (`Cargo.toml`) is found.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    pub root_dir: PathBuf,
}

/// A package reference: either the package the interface lives in (the
/// input package) or the derived output package (a sibling `gen/`
/// subpackage by convention).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub import_path: String,
    pub dir: PathBuf,
}

/// A named group of functions sharing a name, version, and path prefix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub version: String,
    pub path_prefix: Option<String>,
    pub functions: Vec<Function>,
    pub docs: Vec<String>,
}

impl Service {
    /// Normalized prefix: begins with `/`, never ends with one.
    pub fn normalized_prefix(&self) -> String {
        normalize_prefix(self.path_prefix.as_deref().unwrap_or(""))
    }
}

/// Normalize a path prefix so it begins with `/` and never ends with one
/// (unless it is the root, in which case it is empty).
pub fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let mut s = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    };
    while s.len() > 1 && s.ends_with('/') {
        s.pop();
    }
    s
}

/// A single invocable operation within a service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub request: String,
    pub response: String,
    pub http_method: HttpMethod,
    pub path: String,
    pub success_status: u16,
    pub docs: Vec<String>,
}

impl Default for Function {
    fn default() -> Self {
        Self {
            name: String::new(),
            request: String::new(),
            response: String::new(),
            http_method: HttpMethod::Post,
            path: String::new(),
            success_status: 200,
            docs: Vec::new(),
        }
    }
}

impl Function {
    /// Default path when no doc option overrides it: `/ServiceName.FunctionName`.
    pub fn default_path(service_name: &str, function_name: &str) -> String {
        format!("/{service_name}.{function_name}")
    }

    /// Whether this method carries its parameters in a JSON body.
    pub fn is_body_carrying(&self) -> bool {
        self.http_method.is_body_carrying()
    }

    /// The path parameters for this function, resolved against the
    /// request record's fields by case-insensitive transport-name match.
    /// Unresolved `:name` tokens are silently dropped.
    pub fn path_parameters(&self, request: &Record) -> Vec<GatewayParameter> {
        split_path_segments(&self.path)
            .into_iter()
            .filter_map(|seg| seg.strip_prefix(':'))
            .filter_map(|name| {
                request
                    .fields
                    .iter()
                    .find(|f| !f.binding.omit && f.binding.transport_name.eq_ignore_ascii_case(name))
                    .map(|f| GatewayParameter {
                        key: name.to_string(),
                        field_name: f.name.clone(),
                    })
            })
            .collect()
    }

    /// The query parameters for this function: every non-omitted request
    /// field not already consumed as a path parameter. Only meaningful
    /// for non-body-carrying methods.
    pub fn query_parameters(&self, request: &Record) -> Vec<GatewayParameter> {
        if self.is_body_carrying() {
            return Vec::new();
        }
        let path_fields: Vec<String> = self
            .path_parameters(request)
            .into_iter()
            .map(|p| p.field_name)
            .collect();
        request
            .fields
            .iter()
            .filter(|f| !f.binding.omit && !path_fields.iter().any(|p| p == &f.name))
            .map(|f| GatewayParameter {
                key: f.binding.transport_name.clone(),
                field_name: f.name.clone(),
            })
            .collect()
    }
}

/// Split a URL path into non-empty segments, ignoring leading/trailing
/// separators.
pub fn split_path_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Patch,
    Delete,
    Head,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Some(Self::Get),
            "PUT" => Some(Self::Put),
            "POST" => Some(Self::Post),
            "PATCH" => Some(Self::Patch),
            "DELETE" => Some(Self::Delete),
            "HEAD" => Some(Self::Head),
            _ => None,
        }
    }

    /// Whether a request for this method carries its payload in a JSON
    /// body, as opposed to only the query string and path.
    pub fn is_body_carrying(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

/// An overlay pairing a URL path token or query key with the Field it
/// binds to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayParameter {
    pub key: String,
    pub field_name: String,
}

/// A record type (request, response, or a nested type reachable from one).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub fields: Vec<Field>,
}

impl Record {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Case-insensitive, transport-name-aware lookup, as used by the
    /// binder and the client's URL builder.
    pub fn field_by_transport_name(&self, transport_name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|f| !f.binding.omit && f.binding.transport_name.eq_ignore_ascii_case(transport_name))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub ty: TypeDescriptor,
    pub binding: FieldBinding,
    pub docs: Vec<String>,
}

/// Binding options derived from a field's tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldBinding {
    /// The effective name on the wire: the re-mapped name if one was
    /// given, otherwise the field's own name.
    pub transport_name: String,
    pub omit: bool,
    /// Marks this field as an embedded struct (`#[serde(flatten)]`), to be
    /// spliced into the containing record's flattened field list rather
    /// than bound as a nested object of its own.
    pub flatten: bool,
}

impl FieldBinding {
    pub fn identity(field_name: &str) -> Self {
        Self {
            transport_name: field_name.to_string(),
            omit: false,
            flatten: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeKind {
    String,
    Bool,
    Int,
    Float,
    Array,
    Slice,
    Map,
    Struct,
    Interface,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JsonKind {
    String,
    Number,
    Boolean,
    Array,
    Object,
}

impl JsonKind {
    /// A leaf kind is bindable from a single string value (path segment
    /// or query value); `object`/`array` are deferred to the body.
    pub fn is_leaf(&self) -> bool {
        matches!(self, JsonKind::String | JsonKind::Number | JsonKind::Boolean)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub name: String,
    pub pointer: bool,
    pub kind: TypeKind,
    pub elem: Option<Box<TypeDescriptor>>,
    pub key: Option<Box<TypeDescriptor>>,
    pub json_kind: JsonKind,
}

impl TypeDescriptor {
    pub fn leaf(name: impl Into<String>, kind: TypeKind, json_kind: JsonKind) -> Self {
        Self {
            name: name.into(),
            pointer: false,
            kind,
            elem: None,
            key: None,
            json_kind,
        }
    }
}

/// Mapping from `Owner` or `Owner.Member` keys to a list of comment lines.
pub type DocIndex = HashMap<String, Vec<String>>;

/// Mapping from `Owner.Member` keys to raw field-tag text.
pub type TagIndex = HashMap<String, String>;

/// Build a documentation key for a service or record: `"Name"`.
pub fn doc_key(owner: &str) -> String {
    owner.to_string()
}

/// Build a documentation key for a function or field: `"Owner.Member"`.
pub fn doc_member_key(owner: &str, member: &str) -> String {
    format!("{owner}.{member}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, transport: &str, omit: bool) -> Field {
        Field {
            name: name.to_string(),
            ty: TypeDescriptor::leaf("i64", TypeKind::Int, JsonKind::Number),
            binding: FieldBinding {
                transport_name: transport.to_string(),
                omit,
                flatten: false,
            },
            docs: Vec::new(),
        }
    }

    #[test]
    fn path_parameters_resolve_case_insensitively() {
        let request = Record {
            name: "AddRequest".into(),
            fields: vec![field("A", "A", false), field("B", "B", false)],
        };
        let func = Function {
            name: "Add".into(),
            request: "AddRequest".into(),
            response: "AddResponse".into(),
            http_method: HttpMethod::Get,
            path: "/addition/:a/:b".into(),
            success_status: 200,
            docs: Vec::new(),
        };
        let params = func.path_parameters(&request);
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].field_name, "A");
        assert_eq!(params[1].field_name, "B");
    }

    #[test]
    fn unresolved_path_parameters_are_dropped() {
        let request = Record {
            name: "Req".into(),
            fields: vec![field("A", "A", false)],
        };
        let func = Function {
            path: "/v2/:a/:missing".into(),
            http_method: HttpMethod::Get,
            ..Default::default()
        };
        let params = func.path_parameters(&request);
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].key, "a");
    }

    #[test]
    fn query_parameters_exclude_path_and_omitted_fields() {
        let request = Record {
            name: "Req".into(),
            fields: vec![
                field("Id", "Id", false),
                field("Limit", "Limit", false),
                field("Secret", "Secret", true),
            ],
        };
        let func = Function {
            path: "/things/:id".into(),
            http_method: HttpMethod::Get,
            ..Default::default()
        };
        let query = func.query_parameters(&request);
        let names: Vec<&str> = query.iter().map(|p| p.field_name.as_str()).collect();
        assert_eq!(names, vec!["Limit"]);
    }

    #[test]
    fn normalize_prefix_trims_trailing_slash_and_adds_leading() {
        assert_eq!(normalize_prefix("v2/"), "/v2");
        assert_eq!(normalize_prefix("/v2/"), "/v2");
        assert_eq!(normalize_prefix(""), "");
        assert_eq!(normalize_prefix("/"), "/");
    }
}
