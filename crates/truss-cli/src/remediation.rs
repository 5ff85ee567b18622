//! Bullet-list remediation hints for the parse-error kinds a user is
//! most likely to hit: one short message, then a few actionable
//! follow-ups per error kind.

use truss_parse::ExtractError;

/// Hints for `err`, or an empty list when `err` doesn't wrap a known
/// extractor error kind (generator and I/O failures already carry enough
/// context in their own `Display` message).
pub fn hints(err: &anyhow::Error) -> Vec<&'static str> {
    let Some(extract_err) = err.downcast_ref::<ExtractError>() else {
        return Vec::new();
    };

    match extract_err {
        ExtractError::ModuleNotFound { .. } => vec![
            "make sure the source file lives under a directory with a Cargo.toml",
            "run truss from inside the crate, not above it",
        ],
        ExtractError::NoServiceFound { .. } => vec![
            "declare at least one inherent impl block for the service in this file",
            "service methods must be pub async fn taking &self and one request parameter",
        ],
        ExtractError::ManifestMissingName { .. } => vec!["add a [package] name to the Cargo.toml above this file"],
        ExtractError::ManifestSyntax { .. } => vec!["check the Cargo.toml above this file for a syntax error"],
        ExtractError::Syntax { .. } => vec!["check the source file for a syntax error rustc would also reject"],
        ExtractError::UnknownType { .. } => {
            vec!["define the request/response struct in the same file as the service that references it"]
        }
        ExtractError::WrongParameterCount { .. } => {
            vec!["a service method must take exactly one parameter besides &self"]
        }
        ExtractError::NotAResult { .. } => vec!["a service method must return Result<Response, Error>"],
        ExtractError::MalformedDocOption { .. } => {
            vec!["doc options must start with a recognized directive (GET/POST/.../HTTP/PATH/PREFIX/VERSION) followed by its argument"]
        }
        ExtractError::Io { .. } => vec!["confirm the path exists and is readable"],
    }
}
