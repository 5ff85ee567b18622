//! Build an OpenAPI document directly from a parsed
//! [`truss_core::model::Context`].

use serde_json::json;
use truss_core::model::{Context, Function, HttpMethod, Record, Service};

use crate::builder::OpenApiBuilder;
use crate::schema::record_schema;
use crate::types::{OpenApiOperation, OpenApiParameter, OpenApiPath, OpenApiSchema};
use crate::Result;

/// Render `context` as a complete OpenAPI 3 document.
pub fn build_document(context: &Context, title: &str, version: &str) -> Result<serde_json::Value> {
    let mut builder = OpenApiBuilder::new().title(title).version(version);

    let mut schemas = Vec::new();
    for record in &context.records {
        schemas.push(OpenApiSchema::new(record.name.clone(), record_schema(record)));
    }
    builder = builder.merge_schemas(schemas)?;

    let mut paths = Vec::new();
    for service in &context.services {
        for function in &service.functions {
            if let Some(request) = context.record(&function.request) {
                paths.push(operation_for(service, function, request, context));
            }
        }
    }
    builder = builder.merge_paths(paths);

    Ok(builder.build())
}

fn operation_for(
    service: &Service,
    function: &Function,
    request: &Record,
    context: &Context,
) -> OpenApiPath {
    let full_path = truss_core::naming::join_path(
        &service.normalized_prefix(),
        &truss_core::naming::colon_to_braces(&function.path),
    );

    let mut operation = OpenApiOperation::new(format!("{}.{}", service.name, function.name))
        .with_id(format!("{}.{}", service.name, function.name));

    if !function.docs.is_empty() {
        operation = operation.with_description(function.docs.join("\n"));
    }
    if !service.name.is_empty() {
        operation = operation.with_tag(service.name.clone());
    }

    for param in function.path_parameters(request) {
        operation = operation.with_parameter(OpenApiParameter::path(param.key));
    }
    for param in function.query_parameters(request) {
        operation = operation.with_parameter(OpenApiParameter::query(param.key, false));
    }
    if function.is_body_carrying() {
        operation.request_body = Some(json!({
            "content": {
                "application/json": {
                    "schema": {"$ref": format!("#/components/schemas/{}", function.request)}
                }
            }
        }));
    }

    let response_schema = context
        .record(&function.response)
        .map(|_| json!({"$ref": format!("#/components/schemas/{}", function.response)}))
        .unwrap_or_else(|| json!({}));
    operation = operation.with_response(
        function.success_status.to_string(),
        json!({
            "description": "Success",
            "content": {"application/json": {"schema": response_schema}}
        }),
    );

    OpenApiPath::new(full_path, http_method_str(function.http_method)).with_operation(operation)
}

fn http_method_str(method: HttpMethod) -> &'static str {
    match method {
        HttpMethod::Get => "get",
        HttpMethod::Put => "put",
        HttpMethod::Post => "post",
        HttpMethod::Patch => "patch",
        HttpMethod::Delete => "delete",
        HttpMethod::Head => "head",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use truss_core::model::{Field, FieldBinding, JsonKind, Module, Package, TypeDescriptor, TypeKind};
    use std::path::PathBuf;

    fn sample_context() -> Context {
        let request = Record {
            name: "GetUserRequest".into(),
            fields: vec![Field {
                name: "Id".into(),
                ty: TypeDescriptor::leaf("String", TypeKind::String, JsonKind::String),
                binding: FieldBinding::identity("Id"),
                docs: Vec::new(),
            }],
        };
        let response = Record {
            name: "User".into(),
            fields: vec![Field {
                name: "Id".into(),
                ty: TypeDescriptor::leaf("String", TypeKind::String, JsonKind::String),
                binding: FieldBinding::identity("Id"),
                docs: Vec::new(),
            }],
        };
        let function = Function {
            name: "GetUser".into(),
            request: "GetUserRequest".into(),
            response: "User".into(),
            http_method: HttpMethod::Get,
            path: "/users/:id".into(),
            success_status: 200,
            docs: vec!["Fetch a user.".into()],
        };
        let service = Service {
            name: "Users".into(),
            version: String::new(),
            path_prefix: None,
            functions: vec![function],
            docs: Vec::new(),
        };
        Context {
            module: Module {
                name: "demo".into(),
                root_dir: PathBuf::from("."),
            },
            input_package: Package {
                name: "demo".into(),
                import_path: "demo".into(),
                dir: PathBuf::from("."),
            },
            output_package: Package {
                name: "demo_gen".into(),
                import_path: "demo/gen".into(),
                dir: PathBuf::from("./gen"),
            },
            services: vec![service],
            records: vec![request, response],
            docs: Default::default(),
            tags: Default::default(),
            built_at: 0,
        }
    }

    #[test]
    fn builds_a_document_with_the_expected_path_and_schema() {
        let ctx = sample_context();
        let doc = build_document(&ctx, "Demo", "1.0.0").unwrap();
        assert_eq!(doc["info"]["title"], "Demo");
        assert!(doc["paths"]["/users/{id}"]["get"].is_object());
        assert!(doc["components"]["schemas"]["User"].is_object());
        assert!(doc["components"]["schemas"]["GetUserRequest"].is_object());
    }

    #[test]
    fn path_parameter_is_listed_on_the_operation() {
        let ctx = sample_context();
        let doc = build_document(&ctx, "Demo", "1.0.0").unwrap();
        let params = doc["paths"]["/users/{id}"]["get"]["parameters"].as_array().unwrap();
        assert_eq!(params[0]["name"], "id");
        assert_eq!(params[0]["in"], "path");
    }
}
