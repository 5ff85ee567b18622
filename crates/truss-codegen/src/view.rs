//! Serializable projections of `truss_core::model` shaped for template
//! consumption: pre-computed case variants and per-language type names so
//! a `.hbs` template never has to reimplement naming logic itself.

use serde::Serialize;
use truss_core::model::{Context, Field, Function, JsonKind, Record, Service, TypeKind};
use truss_core::naming;

#[derive(Debug, Clone, Serialize)]
pub struct ContextView {
    pub module_name: String,
    pub services: Vec<ServiceView>,
    pub records: Vec<RecordView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceView {
    pub name: String,
    pub snake_name: String,
    pub screaming_snake_name: String,
    pub version: String,
    pub prefix: String,
    pub functions: Vec<FunctionView>,
    pub docs: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionView {
    pub name: String,
    pub snake_name: String,
    pub camel_name: String,
    pub request: String,
    pub response: String,
    pub http_method: &'static str,
    pub http_method_variant: &'static str,
    pub path: String,
    pub path_with_braces: String,
    pub success_status: u16,
    pub is_body_carrying: bool,
    pub path_params: Vec<String>,
    pub query_params: Vec<ParamView>,
    pub binding_schema: Vec<SchemaEntryView>,
    pub docs: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParamView {
    pub key: String,
    pub field_name: String,
}

/// One entry of a request record's flattened binding schema: a dotted
/// path/query key paired with the declared JSON kind of the field it
/// binds to, so the gateway binder can tell a numeric-looking string
/// from an actually-numeric field.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaEntryView {
    pub path: String,
    pub json_kind_variant: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordView {
    pub name: String,
    pub fields: Vec<FieldView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
    pub name: String,
    pub snake_name: String,
    pub camel_name: String,
    pub transport_name: String,
    pub omit: bool,
    pub optional: bool,
    pub json_kind: &'static str,
    pub rust_type: String,
    pub ts_type: String,
    pub python_type: String,
}

/// Build the full view for a context, resolving each function's request
/// record to compute its path/query parameter views.
pub fn build(context: &Context) -> ContextView {
    ContextView {
        module_name: context.module.name.clone(),
        services: context.services.iter().map(|s| service_view(s, context)).collect(),
        records: context.records.iter().map(record_view).collect(),
    }
}

fn service_view(service: &Service, context: &Context) -> ServiceView {
    ServiceView {
        name: service.name.clone(),
        snake_name: naming::to_snake_case(&service.name),
        screaming_snake_name: naming::to_screaming_snake_case(&service.name),
        version: service.version.clone(),
        prefix: service.normalized_prefix(),
        functions: service
            .functions
            .iter()
            .map(|f| function_view(f, context))
            .collect(),
        docs: service.docs.clone(),
    }
}

fn function_view(function: &Function, context: &Context) -> FunctionView {
    let request = context.record(&function.request);
    let (path_params, query_params, binding_schema) = match request {
        Some(record) => (
            function
                .path_parameters(record)
                .into_iter()
                .map(|p| p.key)
                .collect(),
            function
                .query_parameters(record)
                .into_iter()
                .map(|p| ParamView {
                    key: p.key,
                    field_name: p.field_name,
                })
                .collect(),
            binding_schema(record, context),
        ),
        None => (Vec::new(), Vec::new(), Vec::new()),
    };

    FunctionView {
        name: function.name.clone(),
        snake_name: naming::to_snake_case(&function.name),
        camel_name: naming::to_camel_case(&function.name),
        request: function.request.clone(),
        response: function.response.clone(),
        http_method: function.http_method.as_str(),
        http_method_variant: http_method_variant(function.http_method),
        path: function.path.clone(),
        path_with_braces: naming::colon_to_braces(&function.path),
        success_status: function.success_status,
        is_body_carrying: function.is_body_carrying(),
        path_params,
        query_params,
        binding_schema,
        docs: function.docs.clone(),
    }
}

/// Flatten a request record's fields into dotted path/kind pairs,
/// descending into nested record references the same way a query string
/// addresses them (`page.limit`). Bounded to guard against a
/// self-referential record chain; real request shapes never nest this
/// deep.
fn binding_schema(record: &Record, context: &Context) -> Vec<SchemaEntryView> {
    let mut out = Vec::new();
    collect_binding_schema(record, context, "", &mut out, 0);
    out
}

fn collect_binding_schema(
    record: &Record,
    context: &Context,
    prefix: &str,
    out: &mut Vec<SchemaEntryView>,
    depth: usize,
) {
    if depth > 8 {
        return;
    }
    for field in &record.fields {
        if field.binding.omit {
            continue;
        }
        let path = if prefix.is_empty() {
            field.binding.transport_name.clone()
        } else {
            format!("{prefix}.{}", field.binding.transport_name)
        };
        if field.ty.kind == TypeKind::Struct {
            if let Some(nested) = context.record(&field.ty.name) {
                collect_binding_schema(nested, context, &path, out, depth + 1);
                continue;
            }
        }
        out.push(SchemaEntryView {
            path,
            json_kind_variant: json_kind_variant_name(field.ty.json_kind),
        });
    }
}

fn json_kind_variant_name(kind: JsonKind) -> &'static str {
    match kind {
        JsonKind::String => "String",
        JsonKind::Number => "Number",
        JsonKind::Boolean => "Boolean",
        JsonKind::Array => "Array",
        JsonKind::Object => "Object",
    }
}

fn record_view(record: &Record) -> RecordView {
    RecordView {
        name: record.name.clone(),
        fields: record.fields.iter().map(field_view).collect(),
    }
}

fn field_view(field: &Field) -> FieldView {
    FieldView {
        name: field.name.clone(),
        snake_name: naming::to_snake_case(&field.name),
        camel_name: naming::to_camel_case(&field.name),
        transport_name: field.binding.transport_name.clone(),
        omit: field.binding.omit,
        optional: field.ty.pointer,
        json_kind: json_kind_str(field.ty.json_kind),
        rust_type: rust_type_name(&field.ty),
        ts_type: ts_type_name(&field.ty),
        python_type: python_type_name(&field.ty),
    }
}

fn http_method_variant(method: truss_core::model::HttpMethod) -> &'static str {
    use truss_core::model::HttpMethod;
    match method {
        HttpMethod::Get => "Get",
        HttpMethod::Put => "Put",
        HttpMethod::Post => "Post",
        HttpMethod::Patch => "Patch",
        HttpMethod::Delete => "Delete",
        HttpMethod::Head => "Head",
    }
}

fn json_kind_str(kind: JsonKind) -> &'static str {
    match kind {
        JsonKind::String => "string",
        JsonKind::Number => "number",
        JsonKind::Boolean => "boolean",
        JsonKind::Array => "array",
        JsonKind::Object => "object",
    }
}

fn rust_type_name(ty: &truss_core::model::TypeDescriptor) -> String {
    let base = ty.name.clone();
    if ty.pointer {
        format!("Option<{base}>")
    } else {
        base
    }
}

fn ts_type_name(ty: &truss_core::model::TypeDescriptor) -> String {
    let base = match ty.json_kind {
        JsonKind::String => "string".to_string(),
        JsonKind::Number => "number".to_string(),
        JsonKind::Boolean => "boolean".to_string(),
        JsonKind::Array => format!(
            "{}[]",
            ty.elem.as_deref().map(ts_type_name).unwrap_or_else(|| "unknown".into())
        ),
        JsonKind::Object => ty.name.clone(),
    };
    if ty.pointer {
        format!("{base} | null")
    } else {
        base
    }
}

fn python_type_name(ty: &truss_core::model::TypeDescriptor) -> String {
    let base = match ty.json_kind {
        JsonKind::String => "str".to_string(),
        JsonKind::Number => "float".to_string(),
        JsonKind::Boolean => "bool".to_string(),
        JsonKind::Array => format!(
            "list[{}]",
            ty.elem.as_deref().map(python_type_name).unwrap_or_else(|| "object".into())
        ),
        JsonKind::Object => ty.name.clone(),
    };
    if ty.pointer {
        format!("Optional[{base}]")
    } else {
        base
    }
}
