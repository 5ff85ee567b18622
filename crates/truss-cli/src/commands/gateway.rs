//! `truss gateway <path>`: render the `rust.gateway` artifact.

use std::path::Path;

use anyhow::{Context as _, Result};
use truss_codegen::artifact_path;

use super::{extract, renderer_for, view};

pub fn run(path: &Path, template: Option<&Path>) -> Result<String> {
    let context = extract(path)?;
    let renderer = renderer_for("rust.gateway", template)?;
    let rendered = renderer
        .render("rust.gateway", &view(&context))
        .context("failed to render the gateway template")?;
    let out = artifact_path(path, "gateway.rs");
    truss_codegen::write_artifact(&out, &rendered).with_context(|| format!("failed to write {}", out.display()))?;
    Ok(format!("wrote {}", out.display()))
}
