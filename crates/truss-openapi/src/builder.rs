//! OpenAPI spec builder for composing multiple specs.

use crate::Result;
use crate::error::OpenApiError;
use crate::types::{OpenApiPath, OpenApiSchema};
use serde_json::{Map, Value};

/// Builder for composing OpenAPI specs from multiple sources.
///
/// # Conflict resolution
///
/// - **Paths**: last write wins (a later `merge()` overrides an earlier
///   one for the same path+method).
/// - **Schemas**: identical schemas are deduplicated; different schemas
///   sharing a name are an error.
#[derive(Debug, Clone)]
pub struct OpenApiBuilder {
    title: Option<String>,
    version: Option<String>,
    description: Option<String>,
    paths: Map<String, Value>,
    schemas: Map<String, Value>,
}

impl Default for OpenApiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenApiBuilder {
    pub fn new() -> Self {
        Self {
            title: None,
            version: None,
            description: None,
            paths: Map::new(),
            schemas: Map::new(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Merge an OpenAPI spec given as a raw JSON value.
    pub fn merge(mut self, spec: Value) -> Result<Self> {
        if let Some(paths) = spec.get("paths").and_then(|p| p.as_object()) {
            for (path, methods) in paths {
                if let Some(methods_obj) = methods.as_object() {
                    let path_entry = self
                        .paths
                        .entry(path.clone())
                        .or_insert_with(|| Value::Object(Map::new()));

                    if let Some(path_obj) = path_entry.as_object_mut() {
                        for (method, operation) in methods_obj {
                            path_obj.insert(method.clone(), operation.clone());
                        }
                    }
                }
            }
        }

        if let Some(components) = spec.get("components").and_then(|c| c.as_object()) {
            if let Some(schemas) = components.get("schemas").and_then(|s| s.as_object()) {
                for (name, schema) in schemas {
                    self.merge_schema(name.clone(), schema.clone())?;
                }
            }
        }

        if let Some(schemas) = spec.get("schemas").and_then(|s| s.as_object()) {
            for (name, schema) in schemas {
                self.merge_schema(name.clone(), schema.clone())?;
            }
        }

        Ok(self)
    }

    /// Merge typed paths.
    pub fn merge_paths(mut self, paths: Vec<OpenApiPath>) -> Self {
        for path_def in paths {
            let path_entry = self
                .paths
                .entry(path_def.path.clone())
                .or_insert_with(|| Value::Object(Map::new()));

            if let Some(path_obj) = path_entry.as_object_mut() {
                let operation = serde_json::to_value(&path_def.operation)
                    .unwrap_or_else(|_| Value::Object(Map::new()));
                path_obj.insert(path_def.method.to_lowercase(), operation);
            }
        }
        self
    }

    /// Merge typed schemas.
    pub fn merge_schemas(mut self, schemas: Vec<OpenApiSchema>) -> Result<Self> {
        for schema_def in schemas {
            self.merge_schema(schema_def.name, schema_def.schema)?;
        }
        Ok(self)
    }

    fn merge_schema(&mut self, name: String, schema: Value) -> Result<()> {
        if let Some(existing) = self.schemas.get(&name) {
            if existing != &schema {
                return Err(OpenApiError::SchemaConflict { name });
            }
        } else {
            self.schemas.insert(name, schema);
        }
        Ok(())
    }

    /// Build the final OpenAPI document.
    pub fn build(self) -> Value {
        let mut spec = Map::new();

        spec.insert("openapi".to_string(), Value::String("3.0.0".to_string()));

        let mut info = Map::new();
        info.insert(
            "title".to_string(),
            Value::String(self.title.unwrap_or_else(|| "API".to_string())),
        );
        info.insert(
            "version".to_string(),
            Value::String(self.version.unwrap_or_else(|| "0.1.0".to_string())),
        );
        if let Some(desc) = self.description {
            info.insert("description".to_string(), Value::String(desc));
        }
        spec.insert("info".to_string(), Value::Object(info));

        if !self.paths.is_empty() {
            spec.insert("paths".to_string(), Value::Object(self.paths));
        }

        if !self.schemas.is_empty() {
            let mut components = Map::new();
            components.insert("schemas".to_string(), Value::Object(self.schemas));
            spec.insert("components".to_string(), Value::Object(components));
        }

        Value::Object(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn basic_builder_populates_info_block() {
        let spec = OpenApiBuilder::new()
            .title("Test API")
            .version("1.0.0")
            .description("A test API")
            .build();

        assert_eq!(spec["info"]["title"], "Test API");
        assert_eq!(spec["info"]["version"], "1.0.0");
        assert_eq!(spec["openapi"], "3.0.0");
    }

    #[test]
    fn later_merge_overrides_same_path_and_method() {
        let spec1 = json!({"paths": {"/users": {"get": {"summary": "First"}}}});
        let spec2 = json!({"paths": {"/users": {"get": {"summary": "Second"}}}});

        let combined = OpenApiBuilder::new().merge(spec1).unwrap().merge(spec2).unwrap().build();
        assert_eq!(combined["paths"]["/users"]["get"]["summary"], "Second");
    }

    #[test]
    fn identical_schemas_dedupe_but_conflicting_ones_error() {
        let user_schema = json!({"type": "object", "properties": {"name": {"type": "string"}}});
        let spec1 = json!({"components": {"schemas": {"User": user_schema.clone()}}});
        let spec2 = json!({"components": {"schemas": {"User": user_schema}}});
        assert!(OpenApiBuilder::new().merge(spec1).unwrap().merge(spec2).is_ok());

        let conflicting = json!({"components": {"schemas": {"User": {"type": "object", "properties": {"id": {"type": "integer"}}}}}});
        let spec3 = json!({"components": {"schemas": {"User": user_schema_again()}}});
        let err = OpenApiBuilder::new()
            .merge(spec3)
            .unwrap()
            .merge(conflicting)
            .unwrap_err();
        assert!(matches!(err, OpenApiError::SchemaConflict { name } if name == "User"));
    }

    fn user_schema_again() -> Value {
        json!({"type": "object", "properties": {"name": {"type": "string"}}})
    }
}
