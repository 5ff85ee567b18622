//! Top-level entry point: turn a source file path into a
//! [`truss_core::model::Context`].

use std::fs;
use std::path::Path;

use syn::Item;
use truss_core::model::{Context, Package};

use crate::error::ExtractError;
use crate::module;
use crate::records::{expand_embedded_fields, record_from_struct};
use crate::services::service_from_impl;

/// Parse `source_path` and build the Model it describes.
///
/// Every inherent `impl` block becomes a [`truss_core::model::Service`];
/// every named-field `struct` becomes a
/// [`truss_core::model::Record`]. The enclosing module is discovered by
/// walking parent directories for a `Cargo.toml`.
pub fn extract(source_path: &Path) -> Result<Context, ExtractError> {
    let raw = fs::read_to_string(source_path).map_err(|source| ExtractError::Io {
        path: source_path.display().to_string(),
        source,
    })?;
    let file = syn::parse_file(&raw).map_err(|source| ExtractError::Syntax {
        path: source_path.display().to_string(),
        source,
    })?;

    let module = module::discover_module(source_path)?;

    let mut services = Vec::new();
    let mut records = Vec::new();

    for item in &file.items {
        match item {
            Item::Impl(item_impl) => {
                if let Some(service) = service_from_impl(item_impl)? {
                    services.push(service);
                }
            }
            Item::Struct(item_struct) => {
                records.push(record_from_struct(item_struct));
            }
            _ => {}
        }
    }

    if services.is_empty() {
        return Err(ExtractError::NoServiceFound {
            path: source_path.display().to_string(),
        });
    }
    let records = expand_embedded_fields(records);
    validate_references(&services, &records)?;

    let input_package = Package {
        name: module.name.clone(),
        import_path: module.name.clone(),
        dir: module.root_dir.clone(),
    };
    let output_package = Package {
        name: format!("{}_gen", module.name),
        import_path: format!("{}/gen", module.name),
        dir: module.root_dir.join("gen"),
    };

    Ok(Context {
        module,
        input_package,
        output_package,
        services,
        records,
        docs: Default::default(),
        tags: Default::default(),
        built_at: 0,
    })
}

/// Ensure every function's request and response type resolves to a
/// known record, so the generator never has to fail midway through
/// rendering an artifact.
fn validate_references(
    services: &[truss_core::model::Service],
    records: &[truss_core::model::Record],
) -> Result<(), ExtractError> {
    for service in services {
        for function in &service.functions {
            for (role, type_name) in [("request", &function.request), ("response", &function.response)] {
                if !records.iter().any(|r| &r.name == type_name) {
                    return Err(ExtractError::UnknownType {
                        service: service.name.clone(),
                        method: format!("{}.{role}", function.name),
                        type_name: type_name.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_fixture(dir: &Path, body: &str) -> std::path::PathBuf {
        fs::write(
            dir.join("Cargo.toml"),
            "[package]\nname = \"fixture\"\nversion = \"0.1.0\"\n",
        )
        .unwrap();
        let src_dir = dir.join("src");
        fs::create_dir_all(&src_dir).unwrap();
        let file = src_dir.join("lib.rs");
        fs::write(&file, body).unwrap();
        file
    }

    #[test]
    fn extracts_a_service_and_its_records() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_fixture(
            dir.path(),
            r#"
            struct QuoteRequest { sku: String }
            struct QuoteResponse { price: i64 }

            impl Pricing {
                pub async fn get_quote(&self, req: QuoteRequest) -> Result<QuoteResponse, Error> {
                    unimplemented!()
                }
            }
            "#,
        );

        let ctx = extract(&file).unwrap();
        assert_eq!(ctx.module.name, "fixture");
        assert_eq!(ctx.services.len(), 1);
        assert_eq!(ctx.services[0].functions.len(), 1);
        assert!(ctx.record("QuoteRequest").is_some());
        assert!(ctx.record("QuoteResponse").is_some());
    }

    #[test]
    fn no_service_in_the_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_fixture(
            dir.path(),
            r#"
            struct QuoteRequest { sku: String }
            "#,
        );

        let err = extract(&file).unwrap_err();
        assert!(matches!(err, ExtractError::NoServiceFound { .. }));
    }

    #[test]
    fn unknown_request_type_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_fixture(
            dir.path(),
            r#"
            struct QuoteResponse { price: i64 }

            impl Pricing {
                pub async fn get_quote(&self, req: QuoteRequest) -> Result<QuoteResponse, Error> {
                    unimplemented!()
                }
            }
            "#,
        );

        let err = extract(&file).unwrap_err();
        assert!(matches!(err, ExtractError::UnknownType { .. }));
    }
}
