//! One submodule per CLI subcommand.

pub mod client;
pub mod docs;
pub mod gateway;
pub mod mock;
pub mod new;

use std::path::Path;

use anyhow::{Context as _, Result};
use truss_codegen::{build_view, ContextView, Renderer};
use truss_core::model::Context;

/// Parse `path` into a [`Context`], the first step of every generate
/// subcommand.
pub(crate) fn extract(path: &Path) -> Result<Context> {
    truss_parse::extract(path).with_context(|| format!("failed to extract a contract from {}", path.display()))
}

/// Build a [`Renderer`] with every built-in template registered, and
/// apply a user override onto `template_name` when one is given — the
/// override fully replaces the corresponding built-in template for this
/// invocation.
pub(crate) fn renderer_for(template_name: &str, override_path: Option<&Path>) -> Result<Renderer> {
    let mut renderer = Renderer::new().context("failed to initialize the template engine")?;
    if let Some(path) = override_path {
        renderer
            .override_template(template_name, path)
            .with_context(|| format!("failed to load template override {}", path.display()))?;
    }
    Ok(renderer)
}

pub(crate) fn view(context: &Context) -> ContextView {
    build_view(context)
}
