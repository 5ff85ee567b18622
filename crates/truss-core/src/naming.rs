//! Naming and reflection utilities shared by the extractor, generator,
//! gateway, and client.

use heck::{ToKebabCase, ToLowerCamelCase, ToPascalCase, ToShoutySnakeCase, ToSnakeCase};

/// Convert an identifier to the PascalCase form used for generated type
/// names.
pub fn to_type_name(name: &str) -> String {
    name.to_pascal_case()
}

/// Convert an identifier to the snake_case form used for generated field
/// and function names in snake_case target languages.
pub fn to_snake_case(name: &str) -> String {
    name.to_snake_case()
}

/// Convert an identifier to the camelCase form used for generated field
/// names in camelCase target languages (TypeScript, Dart, Java).
pub fn to_camel_case(name: &str) -> String {
    name.to_lower_camel_case()
}

/// Convert an identifier to the kebab-case form used for default URL
/// segments.
pub fn to_kebab_case(name: &str) -> String {
    name.to_kebab_case()
}

/// Convert an identifier to the SCREAMING_SNAKE_CASE form used for
/// generated constants, such as a service's path-prefix constant.
pub fn to_screaming_snake_case(name: &str) -> String {
    name.to_shouty_snake_case()
}

/// The default HTTP path for a function with no doc-option override:
/// `/ServiceName.FunctionName`, addressing a method by its fully
/// qualified name.
pub fn default_function_path(service: &str, function: &str) -> String {
    format!("/{service}.{function}")
}

/// Convert an OpenAPI-style `{name}` path template into the gateway's
/// `:name` token form, or the reverse. Both conventions appear across the
/// generated artifacts (OpenAPI docs use `{}`, the router and clients use
/// `:`).
pub fn braces_to_colon(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut chars = path.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '{' {
            out.push(':');
            for c2 in chars.by_ref() {
                if c2 == '}' {
                    break;
                }
                out.push(c2);
            }
        } else {
            out.push(c);
        }
    }
    out
}

pub fn colon_to_braces(path: &str) -> String {
    path.split('/')
        .map(|seg| match seg.strip_prefix(':') {
            Some(name) => format!("{{{name}}}"),
            None => seg.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Join a path prefix and a path, guaranteeing exactly one `/` between
/// them and no trailing slash (unless the result is the root).
pub fn join_path(prefix: &str, path: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    format!("{prefix}{path}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn braces_and_colon_forms_round_trip() {
        let colon = "/users/:id/posts/:post_id";
        let braces = "/users/{id}/posts/{post_id}";
        assert_eq!(braces_to_colon(braces), colon);
        assert_eq!(colon_to_braces(colon), braces);
    }

    #[test]
    fn join_path_normalizes_slashes() {
        assert_eq!(join_path("/v2/", "/things"), "/v2/things");
        assert_eq!(join_path("/v2", "things"), "/v2/things");
        assert_eq!(join_path("", "/things"), "/things");
    }

    #[test]
    fn default_function_path_matches_service_dot_function() {
        assert_eq!(default_function_path("Pricing", "GetQuote"), "/Pricing.GetQuote");
    }

    #[test]
    fn case_conversions_cover_the_generated_name_families() {
        assert_eq!(to_type_name("get_quote"), "GetQuote");
        assert_eq!(to_snake_case("GetQuote"), "get_quote");
        assert_eq!(to_camel_case("GetQuote"), "getQuote");
        assert_eq!(to_kebab_case("GetQuote"), "get-quote");
        assert_eq!(to_screaming_snake_case("GetQuote"), "GET_QUOTE");
    }
}
