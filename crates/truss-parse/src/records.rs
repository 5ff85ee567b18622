//! Struct definitions become [`Record`]s. Field binding overrides reuse
//! `#[serde(rename = "...")]` and `#[serde(skip)]`, the idiomatic way a
//! Rust struct already expresses a wire name and wire omission, rather
//! than inventing a parallel annotation.

use syn::{Fields, ItemStruct, Lit, Meta};
use truss_core::model::{Field, FieldBinding, Record};

use crate::docs::doc_lines;
use crate::types::describe;

/// Build a [`Record`] from a struct item. Tuple and unit structs produce
/// an empty field list; only named fields carry bindable data.
pub fn record_from_struct(item: &ItemStruct) -> Record {
    let name = item.ident.to_string();
    let fields = match &item.fields {
        Fields::Named(named) => named
            .named
            .iter()
            .map(|f| {
                let field_name = f
                    .ident
                    .as_ref()
                    .expect("named field has an identifier")
                    .to_string();
                let binding = parse_binding(&field_name, &f.attrs);
                Field {
                    name: field_name,
                    ty: describe(&f.ty),
                    binding,
                    docs: doc_lines(&f.attrs),
                }
            })
            .collect(),
        _ => Vec::new(),
    };
    Record { name, fields }
}

fn parse_binding(field_name: &str, attrs: &[syn::Attribute]) -> FieldBinding {
    let mut binding = FieldBinding::identity(field_name);

    for attr in attrs {
        if !attr.path().is_ident("serde") {
            continue;
        }
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                if let Ok(value) = meta.value() {
                    if let Ok(Lit::Str(s)) = value.parse() {
                        binding.transport_name = s.value();
                    }
                }
                return Ok(());
            }
            if meta.path.is_ident("skip") {
                binding.omit = true;
                return Ok(());
            }
            if meta.path.is_ident("flatten") {
                binding.flatten = true;
                return Ok(());
            }
            Ok(())
        });
        // Fall back to scanning the raw meta for bare `skip` without a
        // nested-meta-compatible shape (`#[serde(skip)]` alone parses
        // fine above, this branch only guards malformed attributes).
        if let Meta::List(_) = &attr.meta {
            // handled by parse_nested_meta above
        }
    }

    binding
}

/// Splice `#[serde(flatten)]` fields into their containing record's field
/// list, per the embedding invariant: a flattened field whose type
/// resolves to another parsed [`Record`] contributes that record's own
/// (already-flattened) fields in its place; a flattened field whose type
/// is not a known record — a primitive, or a type this crate never saw a
/// struct for — is kept as one field, named after its type rather than
/// its original field name, mirroring a non-struct embed in the source
/// language.
pub fn expand_embedded_fields(records: Vec<Record>) -> Vec<Record> {
    records
        .iter()
        .map(|record| Record {
            name: record.name.clone(),
            fields: flatten_fields(&record.fields, &records),
        })
        .collect()
}

fn flatten_fields(fields: &[Field], records: &[Record]) -> Vec<Field> {
    let mut out = Vec::new();
    for field in fields {
        if !field.binding.flatten {
            out.push(field.clone());
            continue;
        }
        match records.iter().find(|r| r.name == field.ty.name) {
            Some(embedded) => out.extend(flatten_fields(&embedded.fields, records)),
            None => out.push(Field {
                name: field.ty.name.clone(),
                ..field.clone()
            }),
        }
    }
    out
}
