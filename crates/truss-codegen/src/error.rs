use thiserror::Error;

/// Errors raised while rendering or writing a generated artifact.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("template '{name}' not found (looked in: {searched})")]
    TemplateNotFound { name: String, searched: String },

    #[error("failed to register template '{name}': {source}")]
    Register {
        name: String,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    #[error("failed to render template '{name}': {source}")]
    Render {
        name: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },

    #[error("failed to serialize the OpenAPI document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to read template override {path}: {source}")]
    ReadOverride {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
