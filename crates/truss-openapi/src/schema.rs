//! JSON Schema fragments derived from the contract Model, used both for
//! `components/schemas` entries and for parameter/request-body schemas.

use serde_json::{json, Value};
use truss_core::model::{JsonKind, Record, TypeDescriptor};

/// The JSON Schema fragment for a single type descriptor.
pub fn type_schema(ty: &TypeDescriptor) -> Value {
    let mut schema = match ty.kind {
        truss_core::model::TypeKind::Array | truss_core::model::TypeKind::Slice => {
            let items = ty
                .elem
                .as_deref()
                .map(type_schema)
                .unwrap_or_else(|| json!({}));
            json!({"type": "array", "items": items})
        }
        truss_core::model::TypeKind::Map => {
            let additional = ty
                .elem
                .as_deref()
                .map(type_schema)
                .unwrap_or_else(|| json!({}));
            json!({"type": "object", "additionalProperties": additional})
        }
        truss_core::model::TypeKind::Struct => json!({"$ref": format!("#/components/schemas/{}", ty.name)}),
        _ => match ty.json_kind {
            JsonKind::String => json!({"type": "string"}),
            JsonKind::Number => json!({"type": "number"}),
            JsonKind::Boolean => json!({"type": "boolean"}),
            JsonKind::Array => json!({"type": "array"}),
            JsonKind::Object => json!({"type": "object"}),
        },
    };
    if ty.pointer {
        if let Some(obj) = schema.as_object_mut() {
            obj.insert("nullable".to_string(), Value::Bool(true));
        }
    }
    schema
}

/// Build the `components/schemas` entry for a record: an object schema
/// listing every non-omitted field under its transport name.
pub fn record_schema(record: &Record) -> Value {
    let mut properties = serde_json::Map::new();
    let mut required = Vec::new();

    for field in &record.fields {
        if field.binding.omit {
            continue;
        }
        properties.insert(field.binding.transport_name.clone(), type_schema(&field.ty));
        if !field.ty.pointer {
            required.push(Value::String(field.binding.transport_name.clone()));
        }
    }

    let mut schema = json!({
        "type": "object",
        "properties": Value::Object(properties),
    });
    if !required.is_empty() {
        schema
            .as_object_mut()
            .expect("constructed as an object above")
            .insert("required".to_string(), Value::Array(required));
    }
    schema
}

#[cfg(test)]
mod tests {
    use super::*;
    use truss_core::model::{Field, FieldBinding, TypeKind};

    fn leaf_field(name: &str, json_kind: JsonKind, pointer: bool) -> Field {
        Field {
            name: name.to_string(),
            ty: TypeDescriptor {
                pointer,
                ..TypeDescriptor::leaf("x", TypeKind::String, json_kind)
            },
            binding: FieldBinding::identity(name),
            docs: Vec::new(),
        }
    }

    #[test]
    fn required_excludes_nullable_pointer_fields() {
        let record = Record {
            name: "User".into(),
            fields: vec![
                leaf_field("Id", JsonKind::String, false),
                leaf_field("Nickname", JsonKind::String, true),
            ],
        };
        let schema = record_schema(&record);
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(required, vec!["Id"]);
        assert_eq!(schema["properties"]["Nickname"]["nullable"], true);
    }

    #[test]
    fn omitted_fields_are_excluded_from_the_schema() {
        let mut field = leaf_field("Secret", JsonKind::String, false);
        field.binding.omit = true;
        let record = Record {
            name: "Req".into(),
            fields: vec![field],
        };
        let schema = record_schema(&record);
        assert!(schema["properties"].as_object().unwrap().is_empty());
    }

    #[test]
    fn struct_fields_become_refs() {
        let ty = TypeDescriptor {
            name: "Address".into(),
            pointer: false,
            kind: TypeKind::Struct,
            elem: None,
            key: None,
            json_kind: JsonKind::Object,
        };
        assert_eq!(
            type_schema(&ty)["$ref"],
            "#/components/schemas/Address"
        );
    }
}
