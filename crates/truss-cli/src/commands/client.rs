//! `truss client <path> --lang <target>`: render a target-language
//! client proxy.

use std::path::Path;

use anyhow::{bail, Context as _, Result};
use truss_codegen::artifact_path;

use super::{extract, renderer_for, view};

/// (template name, output extension) for each supported target language.
fn target(lang: &str) -> Result<(&'static str, &'static str)> {
    match lang {
        "rust" => Ok(("rust.client", "rs")),
        "ts" | "typescript" => Ok(("ts.client", "ts")),
        "python" | "py" => Ok(("python.client", "py")),
        other => bail!("unsupported target language '{other}' (expected one of: rust, ts, python)"),
    }
}

pub fn run(path: &Path, lang: &str, template: Option<&Path>) -> Result<String> {
    let (template_name, ext) = target(lang)?;
    let context = extract(path)?;
    let renderer = renderer_for(template_name, template)?;
    let rendered = renderer
        .render(template_name, &view(&context))
        .with_context(|| format!("failed to render the {lang} client template"))?;
    let out = artifact_path(path, &format!("client.{ext}"));
    truss_codegen::write_artifact(&out, &rendered).with_context(|| format!("failed to write {}", out.display()))?;
    Ok(format!("wrote {}", out.display()))
}
