//! The doc-option DSL: a handful of recognized lines inside a doc
//! comment that drive HTTP method, path, status, prefix, and version
//! selection, leaving every other line as ordinary documentation passed
//! through to the generated artifacts.
//!
//! Recognized lines (case-insensitive leading token):
//!
//! ```text
//! GET /users/:id
//! PUT /users/:id
//! POST /users
//! PATCH /users/:id
//! DELETE /users/:id
//! HEAD /users/:id
//! PATH /users/:id          (path override without a method change)
//! HTTP 201
//! PREFIX /api
//! VERSION v2
//! ```
//!
//! `PATH` and `PREFIX` scan into the same pair of fields regardless of
//! which doc comment they appear on; it's `services::service_from_impl`
//! that gives them their context-dependent meaning, reading `PATH` on a
//! service's own comment block as a prefix synonym (a service has no
//! path of its own to override) and reading it on a function's comment
//! block as a path override.

use truss_core::model::HttpMethod;

use crate::error::ExtractError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocOptions {
    pub http_method: Option<HttpMethod>,
    pub path: Option<String>,
    pub status: Option<u16>,
    pub prefix: Option<String>,
    pub version: Option<String>,
    pub plain_docs: Vec<String>,
}

/// Scan a list of doc comment lines, pulling out recognized options and
/// leaving the rest as `plain_docs`.
pub fn scan(owner: &str, lines: &[String]) -> Result<DocOptions, ExtractError> {
    let mut options = DocOptions::default();

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            options.plain_docs.push(line.clone());
            continue;
        }

        let mut parts = trimmed.splitn(2, char::is_whitespace);
        let head = parts.next().unwrap_or_default();
        let rest = parts.next().unwrap_or_default().trim();
        let head_upper = head.to_ascii_uppercase();

        if let Some(method) = HttpMethod::from_str_opt(&head_upper) {
            if rest.is_empty() || !rest.starts_with('/') {
                return Err(ExtractError::MalformedDocOption {
                    owner: owner.to_string(),
                    option: trimmed.to_string(),
                    reason: format!("{head_upper} must be followed by a path starting with '/'"),
                });
            }
            options.http_method = Some(method);
            options.path = Some(rest.to_string());
            continue;
        }

        match head_upper.as_str() {
            "PATH" => {
                if rest.is_empty() || !rest.starts_with('/') {
                    return Err(ExtractError::MalformedDocOption {
                        owner: owner.to_string(),
                        option: trimmed.to_string(),
                        reason: "PATH must be followed by a path starting with '/'".to_string(),
                    });
                }
                options.path = Some(rest.to_string());
            }
            "HTTP" => {
                let status: u16 = rest.parse().map_err(|_| ExtractError::MalformedDocOption {
                    owner: owner.to_string(),
                    option: trimmed.to_string(),
                    reason: "HTTP must be followed by a 3-digit status code".to_string(),
                })?;
                options.status = Some(status);
            }
            "PREFIX" => {
                if rest.is_empty() {
                    return Err(ExtractError::MalformedDocOption {
                        owner: owner.to_string(),
                        option: trimmed.to_string(),
                        reason: "PREFIX must be followed by a path".to_string(),
                    });
                }
                options.prefix = Some(rest.to_string());
            }
            "VERSION" => {
                if rest.is_empty() {
                    return Err(ExtractError::MalformedDocOption {
                        owner: owner.to_string(),
                        option: trimmed.to_string(),
                        reason: "VERSION must be followed by a version string".to_string(),
                    });
                }
                options.version = Some(rest.to_string());
            }
            _ => options.plain_docs.push(line.clone()),
        }
    }

    trim_blank_edges(&mut options.plain_docs);
    Ok(options)
}

/// Drop leading and trailing blank lines from the collected prose,
/// leaving any blank lines in the middle untouched.
fn trim_blank_edges(lines: &mut Vec<String>) {
    while lines.first().is_some_and(|l| l.trim().is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn recognizes_method_and_path() {
        let opts = scan("Svc.Fn", &lines(&["GET /users/:id", "Fetch a user."])).unwrap();
        assert_eq!(opts.http_method, Some(HttpMethod::Get));
        assert_eq!(opts.path.as_deref(), Some("/users/:id"));
        assert_eq!(opts.plain_docs, vec!["Fetch a user."]);
    }

    #[test]
    fn recognizes_status_prefix_and_version_independently() {
        let opts = scan(
            "Svc.Fn",
            &lines(&["POST /users", "HTTP 201", "PREFIX /api", "VERSION v2"]),
        )
        .unwrap();
        assert_eq!(opts.status, Some(201));
        assert_eq!(opts.prefix.as_deref(), Some("/api"));
        assert_eq!(opts.version.as_deref(), Some("v2"));
    }

    #[test]
    fn rejects_method_without_leading_slash_path() {
        let err = scan("Svc.Fn", &lines(&["GET users/:id"])).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedDocOption { .. }));
    }

    #[test]
    fn rejects_non_numeric_http_status() {
        let err = scan("Svc.Fn", &lines(&["HTTP nope"])).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedDocOption { .. }));
    }

    #[test]
    fn plain_lines_and_blank_lines_pass_through() {
        let opts = scan("Svc.Fn", &lines(&["Does a thing.", "", "More detail."])).unwrap();
        assert_eq!(opts.plain_docs.len(), 3);
    }

    #[test]
    fn leading_and_trailing_blank_lines_are_trimmed() {
        let opts = scan("Svc.Fn", &lines(&["", "", "Does a thing.", ""])).unwrap();
        assert_eq!(opts.plain_docs, vec!["Does a thing."]);
    }
}
