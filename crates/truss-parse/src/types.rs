//! Map a `syn::Type` onto the host-neutral [`TypeDescriptor`].

use syn::{GenericArgument, PathArguments, Type};
use truss_core::model::{JsonKind, TypeDescriptor, TypeKind};

/// Describe `ty`, unwrapping a single layer of `Option<T>` into the
/// descriptor's `pointer` flag the way the Model expects optional fields
/// to be represented regardless of host language.
pub fn describe(ty: &Type) -> TypeDescriptor {
    if let Some(inner) = unwrap_option(ty) {
        let mut desc = describe(inner);
        desc.pointer = true;
        return desc;
    }
    describe_required(ty)
}

fn unwrap_option(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    args.args.iter().find_map(|a| match a {
        GenericArgument::Type(t) => Some(t),
        _ => None,
    })
}

fn describe_required(ty: &Type) -> TypeDescriptor {
    match ty {
        Type::Path(type_path) => describe_path(type_path),
        Type::Reference(r) => describe_required(&r.elem),
        Type::Array(a) => {
            let elem = describe(&a.elem);
            TypeDescriptor {
                name: quote::quote!(#ty).to_string(),
                pointer: false,
                kind: TypeKind::Array,
                elem: Some(Box::new(elem)),
                key: None,
                json_kind: JsonKind::Array,
            }
        }
        Type::Slice(s) => {
            let elem = describe(&s.elem);
            TypeDescriptor {
                name: quote::quote!(#ty).to_string(),
                pointer: false,
                kind: TypeKind::Slice,
                elem: Some(Box::new(elem)),
                key: None,
                json_kind: JsonKind::Array,
            }
        }
        other => TypeDescriptor {
            name: quote::quote!(#other).to_string(),
            pointer: false,
            kind: TypeKind::Other,
            elem: None,
            key: None,
            json_kind: JsonKind::Object,
        },
    }
}

const INT_NAMES: &[&str] = &[
    "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize",
];
const FLOAT_NAMES: &[&str] = &["f32", "f64"];
/// Time/instant types, whether from `chrono` or the standard library.
/// Every one of them is carried on the wire as a conventional ISO-style
/// string, never as a nested record.
const TIME_NAMES: &[&str] = &["DateTime", "NaiveDateTime", "NaiveDate", "NaiveTime", "SystemTime", "Instant"];

fn describe_path(type_path: &syn::TypePath) -> TypeDescriptor {
    let Some(segment) = type_path.path.segments.last() else {
        return TypeDescriptor::leaf("unknown", TypeKind::Other, JsonKind::Object);
    };
    let ident = segment.ident.to_string();

    if ident == "String" || ident == "str" {
        return TypeDescriptor::leaf(ident, TypeKind::String, JsonKind::String);
    }
    if ident == "bool" {
        return TypeDescriptor::leaf(ident, TypeKind::Bool, JsonKind::Boolean);
    }
    if INT_NAMES.contains(&ident.as_str()) {
        return TypeDescriptor::leaf(ident, TypeKind::Int, JsonKind::Number);
    }
    if FLOAT_NAMES.contains(&ident.as_str()) {
        return TypeDescriptor::leaf(ident, TypeKind::Float, JsonKind::Number);
    }

    if ident == "Vec" {
        if let Some(inner) = first_type_arg(segment) {
            let elem = describe(inner);
            return TypeDescriptor {
                name: "Vec".to_string(),
                pointer: false,
                kind: TypeKind::Array,
                elem: Some(Box::new(elem)),
                key: None,
                json_kind: JsonKind::Array,
            };
        }
    }

    if TIME_NAMES.contains(&ident.as_str()) {
        return TypeDescriptor::leaf(ident, TypeKind::Other, JsonKind::String);
    }

    if matches!(ident.as_str(), "HashMap" | "BTreeMap") {
        if let (Some(key_ty), Some(val_ty)) = (first_type_arg(segment), second_type_arg(segment)) {
            return TypeDescriptor {
                name: ident,
                pointer: false,
                kind: TypeKind::Map,
                elem: Some(Box::new(describe(val_ty))),
                key: Some(Box::new(describe(key_ty))),
                json_kind: JsonKind::Object,
            };
        }
    }

    // Anything else is treated as a nested record reference.
    TypeDescriptor {
        name: ident,
        pointer: false,
        kind: TypeKind::Struct,
        elem: None,
        key: None,
        json_kind: JsonKind::Object,
    }
}

fn first_type_arg(segment: &syn::PathSegment) -> Option<&Type> {
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    args.args.iter().find_map(|a| match a {
        GenericArgument::Type(t) => Some(t),
        _ => None,
    })
}

fn second_type_arg(segment: &syn::PathSegment) -> Option<&Type> {
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    args.args
        .iter()
        .filter_map(|a| match a {
            GenericArgument::Type(t) => Some(t),
            _ => None,
        })
        .nth(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn maps_primitive_leaves() {
        let ty: Type = parse_quote!(String);
        assert_eq!(describe(&ty).json_kind, JsonKind::String);

        let ty: Type = parse_quote!(i64);
        assert_eq!(describe(&ty).json_kind, JsonKind::Number);

        let ty: Type = parse_quote!(bool);
        assert_eq!(describe(&ty).json_kind, JsonKind::Boolean);
    }

    #[test]
    fn unwraps_option_and_sets_pointer() {
        let ty: Type = parse_quote!(Option<String>);
        let desc = describe(&ty);
        assert!(desc.pointer);
        assert_eq!(desc.json_kind, JsonKind::String);
    }

    #[test]
    fn maps_vec_to_array_with_element() {
        let ty: Type = parse_quote!(Vec<i32>);
        let desc = describe(&ty);
        assert_eq!(desc.kind, TypeKind::Array);
        assert_eq!(desc.json_kind, JsonKind::Array);
        assert_eq!(desc.elem.unwrap().json_kind, JsonKind::Number);
    }

    #[test]
    fn maps_map_to_object_with_key_and_value() {
        let ty: Type = parse_quote!(HashMap<String, i32>);
        let desc = describe(&ty);
        assert_eq!(desc.kind, TypeKind::Map);
        assert_eq!(desc.json_kind, JsonKind::Object);
        assert_eq!(desc.key.unwrap().json_kind, JsonKind::String);
        assert_eq!(desc.elem.unwrap().json_kind, JsonKind::Number);
    }

    #[test]
    fn unknown_struct_name_is_treated_as_nested_record() {
        let ty: Type = parse_quote!(Address);
        let desc = describe(&ty);
        assert_eq!(desc.kind, TypeKind::Struct);
        assert_eq!(desc.name, "Address");
    }

    #[test]
    fn time_types_are_treated_as_a_leaf_string_not_a_nested_record() {
        let ty: Type = parse_quote!(DateTime<Utc>);
        let desc = describe(&ty);
        assert_eq!(desc.json_kind, JsonKind::String);
        assert_eq!(desc.kind, TypeKind::Other);

        let ty: Type = parse_quote!(std::time::SystemTime);
        let desc = describe(&ty);
        assert_eq!(desc.json_kind, JsonKind::String);
    }
}
