//! Doc comment extraction: each `/// line` attribute becomes one entry,
//! preserving line order so the doc-option scanner sees them in the
//! order they were written.

use syn::{Expr, ExprLit, Lit, Meta};

/// Return each doc-comment line attached to `attrs`, in source order,
/// with the single leading space `///` conventionally leaves trimmed.
pub fn doc_lines(attrs: &[syn::Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter_map(|attr| {
            if !attr.path().is_ident("doc") {
                return None;
            }
            let Meta::NameValue(meta) = &attr.meta else {
                return None;
            };
            let Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) = &meta.value else {
                return None;
            };
            Some(strip_leading_space(&s.value()))
        })
        .collect()
}

fn strip_leading_space(line: &str) -> String {
    line.strip_prefix(' ').unwrap_or(line).to_string()
}
