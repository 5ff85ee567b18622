//! The template-driven artifact generator: turns a
//! [`truss_core::model::Context`] into source text for a gateway,
//! client, mock, or scaffold file, via an embedded [`renderer::Renderer`]
//! whose built-in templates can be overridden from a path on disk.
//!
//! Callers that also need an OpenAPI document should reach for
//! [`truss_openapi`] directly; this crate only emits handlebars-rendered
//! artifacts and otherwise depends on the same `Context`.

pub mod error;
pub mod helpers;
pub mod output;
pub mod renderer;
pub mod view;

pub use error::GenerateError;
pub use output::{artifact_path, write_artifact};
pub use renderer::Renderer;
pub use view::{build as build_view, ContextView};
