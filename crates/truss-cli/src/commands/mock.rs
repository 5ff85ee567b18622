//! `truss mock <path>`: render an in-memory mock implementation, for
//! caller-side tests that don't want to stand up a real gateway.

use std::path::Path;

use anyhow::{Context as _, Result};
use truss_codegen::artifact_path;

use super::{extract, renderer_for, view};

pub fn run(path: &Path, template: Option<&Path>) -> Result<String> {
    let context = extract(path)?;
    let renderer = renderer_for("rust.mock", template)?;
    let rendered = renderer
        .render("rust.mock", &view(&context))
        .context("failed to render the mock template")?;
    let out = artifact_path(path, "mock.rs");
    truss_codegen::write_artifact(&out, &rendered).with_context(|| format!("failed to write {}", out.display()))?;
    Ok(format!("wrote {}", out.display()))
}
