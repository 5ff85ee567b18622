//! Template loading and rendering: a built-in bundle of embedded
//! templates, keyed by artifact name, plus user-override loading from
//! disk.

use std::path::Path;

use handlebars::Handlebars;

use crate::error::GenerateError;
use crate::helpers;
use crate::view::ContextView;

/// One embedded template per target-language artifact, keyed the same
/// way a caller names an artifact on the CLI.
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("rust.gateway", include_str!("templates/rust/gateway.rs.hbs")),
    ("rust.client", include_str!("templates/rust/client.rs.hbs")),
    ("rust.mock", include_str!("templates/rust/mock.rs.hbs")),
    ("rust.scaffold.cargo_toml", include_str!("templates/scaffold/Cargo.toml.hbs")),
    ("ts.client", include_str!("templates/ts/client.ts.hbs")),
    ("python.client", include_str!("templates/python/client.py.hbs")),
];

/// Renders one named artifact template against a [`ContextView`]. Holds
/// every built-in template pre-registered; a caller-supplied override
/// replaces one entry for the lifetime of this `Renderer`.
pub struct Renderer {
    handlebars: Handlebars<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self, GenerateError> {
        let mut handlebars = Handlebars::new();
        helpers::register(&mut handlebars);
        for (name, source) in BUILTIN_TEMPLATES {
            handlebars
                .register_template_string(*name, *source)
                .map_err(|source| GenerateError::Register {
                    name: (*name).to_string(),
                    source: Box::new(source),
                })?;
        }
        Ok(Self { handlebars })
    }

    /// Replace a built-in (or add a new) template with the contents of a
    /// file on disk. The override fully replaces the corresponding
    /// built-in template for this invocation.
    pub fn override_template(&mut self, name: &str, path: &Path) -> Result<(), GenerateError> {
        let source = std::fs::read_to_string(path).map_err(|source| GenerateError::ReadOverride {
            path: path.display().to_string(),
            source,
        })?;
        self.handlebars
            .register_template_string(name, source)
            .map_err(|source| GenerateError::Register {
                name: name.to_string(),
                source: Box::new(source),
            })
    }

    /// Whether `name` is a template this renderer knows how to render,
    /// built-in or overridden.
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }

    pub fn render(&self, name: &str, context: &ContextView) -> Result<String, GenerateError> {
        if !self.has_template(name) {
            return Err(GenerateError::TemplateNotFound {
                name: name.to_string(),
                searched: BUILTIN_TEMPLATES.iter().map(|(n, _)| *n).collect::<Vec<_>>().join(", "),
            });
        }
        self.handlebars
            .render(name, context)
            .map_err(|source| GenerateError::Render {
                name: name.to_string(),
                source: Box::new(source),
            })
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new().expect("built-in templates are valid handlebars")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view;
    use std::io::Write;
    use truss_core::model::{
        Context, Field, FieldBinding, Function, HttpMethod, JsonKind, Module, Package, Record,
        Service, TypeDescriptor, TypeKind,
    };

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
        let function = Function {
            name: "GetUser".into(),
            request: "GetUserRequest".into(),
            response: "User".into(),
            http_method: HttpMethod::Get,
            path: "/users/:id".into(),
            success_status: 200,
            docs: Vec::new(),
        };
        let service = Service {
            name: "Users".into(),
            version: String::new(),
            path_prefix: None,
            functions: vec![function],
            docs: Vec::new(),
        };
        Context {
            module: Module { name: "demo".into(), root_dir: std::path::PathBuf::from(".") },
            input_package: Package { name: "demo".into(), import_path: "demo".into(), dir: std::path::PathBuf::from(".") },
            output_package: Package { name: "demo_gen".into(), import_path: "demo/gen".into(), dir: std::path::PathBuf::from("./gen") },
            services: vec![service],
            records: vec![request],
            docs: Default::default(),
            tags: Default::default(),
            built_at: 0,
        }
    }

    #[test]
    fn builtin_rust_gateway_template_renders_the_registrar_and_trait() {
        let renderer = Renderer::new().unwrap();
        let view = view::build(&sample_context());
        let out = renderer.render("rust.gateway", &view).unwrap();
        assert!(out.contains("pub trait Users"));
        assert!(out.contains("pub fn register_users"));
        assert!(out.contains("path: \"/users/:id\".to_string()"));
        assert!(!out.contains("{{"));
    }

    #[test]
    fn unknown_template_name_is_reported() {
        let renderer = Renderer::new().unwrap();
        let err = renderer.render("nonexistent", &view::build(&sample_context())).unwrap_err();
        assert!(matches!(err, GenerateError::TemplateNotFound { .. }));
    }

    #[test]
    fn a_user_override_replaces_the_builtin_template() {
        let mut renderer = Renderer::new().unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "// custom gateway for {{{{module_name}}}}").unwrap();
        renderer.override_template("rust.gateway", file.path()).unwrap();
        let out = renderer.render("rust.gateway", &view::build(&sample_context())).unwrap();
        assert_eq!(out.trim(), "// custom gateway for demo");
    }
}
