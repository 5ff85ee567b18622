use thiserror::Error;

/// Errors raised while extracting a [`truss_core::model::Context`] from
/// source.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path} as Rust source: {source}")]
    Syntax {
        path: String,
        #[source]
        source: syn::Error,
    },

    #[error("no enclosing module manifest (Cargo.toml) found above {path}")]
    ModuleNotFound { path: String },

    #[error("no service found in {path} (an exported impl block whose type name ends in 'Service')")]
    NoServiceFound { path: String },

    #[error("Cargo.toml at {path} has no [package] name")]
    ManifestMissingName { path: String },

    #[error("failed to parse manifest {path}: {source}")]
    ManifestSyntax {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("service '{service}' method '{method}' references unknown type '{type_name}'")]
    UnknownType {
        service: String,
        method: String,
        type_name: String,
    },

    #[error("doc option '{option}' on {owner} is malformed: {reason}")]
    MalformedDocOption {
        owner: String,
        option: String,
        reason: String,
    },

    #[error("function '{service}.{function}' must take exactly one request parameter besides &self")]
    WrongParameterCount { service: String, function: String },

    #[error("function '{service}.{function}' must return Result<Response, Error>")]
    NotAResult { service: String, function: String },
}
