//! The fixed helper set every template (built-in or user-supplied) can
//! call. Most built-in templates consume the equivalent precomputed
//! fields on a [`crate::view`] projection instead, but a user template
//! overriding a built-in one has no access to those fields' call sites —
//! only to the context and this helper set. Adding a helper here is a
//! semver-meaningful change to the template contract.

use handlebars::handlebars_helper;
use truss_core::naming;

handlebars_helper!(snake_case: |name: str| naming::to_snake_case(name));
handlebars_helper!(camel_case: |name: str| naming::to_camel_case(name));
handlebars_helper!(kebab_case: |name: str| naming::to_kebab_case(name));
handlebars_helper!(screaming_snake_case: |name: str| naming::to_screaming_snake_case(name));
handlebars_helper!(pascal_case: |name: str| naming::to_type_name(name));

handlebars_helper!(leading_slash: |path: str| if path.starts_with('/') {
    path.to_string()
} else {
    format!("/{path}")
});

handlebars_helper!(openapi_path: |path: str| naming::colon_to_braces(path));

/// Strip a Go-style leading pointer sigil from a type name, for templates
/// that render a type name sourced from a language whose nullability is
/// spelled with `*` rather than our model's `pointer` flag.
handlebars_helper!(strip_pointer: |ty: str| ty.trim_start_matches('*').to_string());

/// The last `.`-separated segment of a fully-qualified name, for
/// templates rendering a bare type reference from a package-qualified
/// one (`pkg.User` -> `User`).
handlebars_helper!(strip_package_prefix: |name: str| {
    name.rsplit('.').next().unwrap_or(name).to_string()
});

/// Normalize a JSON-kind label to its canonical lowercase form.
handlebars_helper!(json_kind: |kind: str| kind.to_lowercase());

/// Register every helper this crate's templates are entitled to call.
pub fn register(handlebars: &mut handlebars::Handlebars) {
    handlebars.register_helper("snake_case", Box::new(snake_case));
    handlebars.register_helper("camel_case", Box::new(camel_case));
    handlebars.register_helper("kebab_case", Box::new(kebab_case));
    handlebars.register_helper("screaming_snake_case", Box::new(screaming_snake_case));
    handlebars.register_helper("pascal_case", Box::new(pascal_case));
    handlebars.register_helper("leading_slash", Box::new(leading_slash));
    handlebars.register_helper("openapi_path", Box::new(openapi_path));
    handlebars.register_helper("strip_pointer", Box::new(strip_pointer));
    handlebars.register_helper("strip_package_prefix", Box::new(strip_package_prefix));
    handlebars.register_helper("json_kind", Box::new(json_kind));
}

#[cfg(test)]
mod tests {
    use super::*;
    use handlebars::Handlebars;
    use serde_json::json;

    fn engine() -> Handlebars<'static> {
        let mut hb = Handlebars::new();
        register(&mut hb);
        hb
    }

    #[test]
    fn case_helpers_match_the_naming_module() {
        let hb = engine();
        assert_eq!(hb.render_template("{{kebab_case this}}", &json!("GetQuote")).unwrap(), "get-quote");
        assert_eq!(hb.render_template("{{screaming_snake_case this}}", &json!("GetQuote")).unwrap(), "GET_QUOTE");
    }

    #[test]
    fn openapi_path_converts_colon_segments_to_braces() {
        let hb = engine();
        let out = hb.render_template("{{openapi_path this}}", &json!("/users/:id")).unwrap();
        assert_eq!(out, "/users/{id}");
    }

    #[test]
    fn leading_slash_is_idempotent() {
        let hb = engine();
        assert_eq!(hb.render_template("{{leading_slash this}}", &json!("things")).unwrap(), "/things");
        assert_eq!(hb.render_template("{{leading_slash this}}", &json!("/things")).unwrap(), "/things");
    }

    #[test]
    fn pointer_and_package_prefix_stripping() {
        let hb = engine();
        assert_eq!(hb.render_template("{{strip_pointer this}}", &json!("*User")).unwrap(), "User");
        assert_eq!(hb.render_template("{{strip_package_prefix this}}", &json!("pkg.User")).unwrap(), "User");
    }
}
