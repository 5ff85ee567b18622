//! `truss docs <path>`: render an `openapi.yml` document describing the
//! source file's services.
//!
//! The document is composed structurally via `truss-openapi` rather than
//! a handlebars template, since there is no text template that expresses
//! "walk every service and record" more clearly than the builder already
//! does. A `--template` override still works: it replaces the whole
//! rendering step with a handlebars render of the same context view.

use std::path::Path;

use anyhow::{Context as _, Result};
use truss_codegen::artifact_path;

use super::{extract, renderer_for, view};

const OVERRIDE_TEMPLATE_NAME: &str = "docs.openapi";

pub fn run(path: &Path, template: Option<&Path>) -> Result<String> {
    let context = extract(path)?;

    let rendered = match template {
        Some(_) => {
            let renderer = renderer_for(OVERRIDE_TEMPLATE_NAME, template)?;
            renderer
                .render(OVERRIDE_TEMPLATE_NAME, &view(&context))
                .context("failed to render the docs template override")?
        }
        None => {
            let document = truss_openapi::build_document(&context, &context.module.name, "0.0.1")
                .context("failed to build the OpenAPI document")?;
            serde_yaml::to_string(&document).context("failed to serialize the OpenAPI document as YAML")?
        }
    };

    let out = artifact_path(path, "openapi.yml");
    truss_codegen::write_artifact(&out, &rendered).with_context(|| format!("failed to write {}", out.display()))?;
    Ok(format!("wrote {}", out.display()))
}
