//! Inherent `impl` blocks become [`Service`]s; each `pub async fn` with a
//! `&self` receiver and exactly one additional parameter becomes a
//! [`Function`], using a doc-option DSL read from its comment block
//! rather than compile-time attributes.

use syn::{FnArg, ImplItem, ItemImpl, Pat, ReturnType, Type};
use truss_core::model::{Function, HttpMethod, Service};

use crate::docopts::{self, DocOptions};
use crate::docs::doc_lines;
use crate::error::ExtractError;

/// Extract the `Self` type name from an impl block, ignoring trait impls
/// (`impl Trait for Type`) since only inherent impls carry the set of
/// callable service methods.
pub fn service_struct_name(item: &ItemImpl) -> Option<String> {
    if item.trait_.is_some() {
        return None;
    }
    let Type::Path(type_path) = item.self_ty.as_ref() else {
        return None;
    };
    type_path.path.segments.last().map(|s| s.ident.to_string())
}

/// Build a [`Service`] from an inherent impl block. Methods that are not
/// eligible (no `&self`, more than one argument, private) are skipped
/// rather than treated as an error.
pub fn service_from_impl(item: &ItemImpl) -> Result<Option<Service>, ExtractError> {
    let Some(name) = service_struct_name(item) else {
        return Ok(None);
    };

    let service_opts = docopts::scan(&name, &doc_lines(&item.attrs))?;

    let mut functions = Vec::new();
    for member in &item.items {
        let ImplItem::Fn(method) = member else {
            continue;
        };
        if method.sig.ident.to_string().starts_with('_') {
            continue;
        }
        if !matches!(method.vis, syn::Visibility::Public(_)) {
            continue;
        }
        if method.sig.asyncness.is_none() {
            continue;
        }
        let has_receiver = method
            .sig
            .inputs
            .iter()
            .any(|a| matches!(a, FnArg::Receiver(_)));
        if !has_receiver {
            continue;
        }

        if let Some(function) = function_from_method(&name, method)? {
            functions.push(function);
        }
    }

    Ok(Some(Service {
        name,
        version: service_opts.version.unwrap_or_default(),
        // A service's comment block treats `PATH` as a synonym for
        // `PREFIX`: `docopts::scan` has no notion of service vs.
        // function context, so at the function level `PATH` means a
        // path override, but a service has no path of its own to
        // override, only a prefix to mount under.
        path_prefix: service_opts.prefix.or(service_opts.path),
        functions,
        docs: service_opts.plain_docs,
    }))
}

fn function_from_method(
    service: &str,
    method: &syn::ImplItemFn,
) -> Result<Option<Function>, ExtractError> {
    let name = method.sig.ident.to_string();

    let request_params: Vec<&syn::PatType> = method
        .sig
        .inputs
        .iter()
        .filter_map(|a| match a {
            FnArg::Typed(t) => Some(t),
            FnArg::Receiver(_) => None,
        })
        .collect();

    if request_params.len() != 1 {
        return Err(ExtractError::WrongParameterCount {
            service: service.to_string(),
            function: name,
        });
    }

    let request_ty = &request_params[0].ty;
    let request = type_name(request_ty).ok_or_else(|| ExtractError::UnknownType {
        service: service.to_string(),
        method: name.clone(),
        type_name: quote::quote!(#request_ty).to_string(),
    })?;

    if !matches!(request_params[0].pat.as_ref(), Pat::Ident(_)) {
        return Err(ExtractError::WrongParameterCount {
            service: service.to_string(),
            function: name,
        });
    }

    let response = response_type_name(service, &name, &method.sig.output)?;

    let doc_opts = docopts::scan(
        &truss_core::model::doc_member_key(service, &name),
        &doc_lines(&method.attrs),
    )?;

    Ok(Some(build_function(service, &name, request, response, doc_opts)))
}

fn build_function(
    service: &str,
    name: &str,
    request: String,
    response: String,
    opts: DocOptions,
) -> Function {
    let http_method = opts.http_method.unwrap_or(HttpMethod::Post);
    let path = opts
        .path
        .unwrap_or_else(|| Function::default_path(service, name));
    let success_status = opts.status.unwrap_or(200);

    Function {
        name: name.to_string(),
        request,
        response,
        http_method,
        path,
        success_status,
        docs: opts.plain_docs,
    }
}

fn type_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(p) => p.path.segments.last().map(|s| s.ident.to_string()),
        Type::Reference(r) => type_name(&r.elem),
        _ => None,
    }
}

/// Unwrap `Result<Response, Error>` and return the `Response` type name.
fn response_type_name(
    service: &str,
    function: &str,
    output: &ReturnType,
) -> Result<String, ExtractError> {
    let ReturnType::Type(_, ty) = output else {
        return Err(ExtractError::NotAResult {
            service: service.to_string(),
            function: function.to_string(),
        });
    };
    let Type::Path(type_path) = ty.as_ref() else {
        return Err(ExtractError::NotAResult {
            service: service.to_string(),
            function: function.to_string(),
        });
    };
    let segment = type_path
        .path
        .segments
        .last()
        .filter(|s| s.ident == "Result")
        .ok_or_else(|| ExtractError::NotAResult {
            service: service.to_string(),
            function: function.to_string(),
        })?;
    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return Err(ExtractError::NotAResult {
            service: service.to_string(),
            function: function.to_string(),
        });
    };
    let ok_type = args
        .args
        .iter()
        .find_map(|a| match a {
            syn::GenericArgument::Type(t) => Some(t),
            _ => None,
        })
        .ok_or_else(|| ExtractError::NotAResult {
            service: service.to_string(),
            function: function.to_string(),
        })?;
    type_name(ok_type).ok_or_else(|| ExtractError::UnknownType {
        service: service.to_string(),
        method: function.to_string(),
        type_name: quote::quote!(#ok_type).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn default_routing_uses_post_and_service_dot_function() {
        let item: ItemImpl = parse_quote! {
            impl Pricing {
                pub async fn get_quote(&self, req: QuoteRequest) -> Result<QuoteResponse, Error> {
                    unimplemented!()
                }
            }
        };
        let service = service_from_impl(&item).unwrap().unwrap();
        assert_eq!(service.name, "Pricing");
        let func = &service.functions[0];
        assert_eq!(func.http_method, HttpMethod::Post);
        assert_eq!(func.path, "/Pricing.get_quote");
        assert_eq!(func.success_status, 200);
    }

    #[test]
    fn doc_option_overrides_method_path_and_status() {
        let item: ItemImpl = parse_quote! {
            impl Users {
                /// GET /users/:id
                /// HTTP 200
                pub async fn get_user(&self, req: GetUserRequest) -> Result<User, Error> {
                    unimplemented!()
                }
            }
        };
        let service = service_from_impl(&item).unwrap().unwrap();
        let func = &service.functions[0];
        assert_eq!(func.http_method, HttpMethod::Get);
        assert_eq!(func.path, "/users/:id");
    }

    #[test]
    fn service_level_prefix_and_version_are_captured() {
        let item: ItemImpl = parse_quote! {
            /// PREFIX /api
            /// VERSION v2
            impl Users {
                pub async fn get_user(&self, req: GetUserRequest) -> Result<User, Error> {
                    unimplemented!()
                }
            }
        };
        let service = service_from_impl(&item).unwrap().unwrap();
        assert_eq!(service.path_prefix.as_deref(), Some("/api"));
        assert_eq!(service.version, "v2");
    }

    #[test]
    fn service_level_path_is_a_prefix_synonym() {
        let item: ItemImpl = parse_quote! {
            /// PATH /v2
            impl Calculator {
                pub async fn add(&self, req: AddRequest) -> Result<AddResponse, Error> {
                    unimplemented!()
                }
            }
        };
        let service = service_from_impl(&item).unwrap().unwrap();
        assert_eq!(service.path_prefix.as_deref(), Some("/v2"));
    }

    #[test]
    fn private_and_non_self_methods_are_skipped() {
        let item: ItemImpl = parse_quote! {
            impl Users {
                pub async fn _helper(&self, req: GetUserRequest) -> Result<User, Error> {
                    unimplemented!()
                }
                pub fn new() -> Self {
                    unimplemented!()
                }
            }
        };
        let service = service_from_impl(&item).unwrap().unwrap();
        assert!(service.functions.is_empty());
    }

    #[test]
    fn trait_impls_are_not_services() {
        let item: ItemImpl = parse_quote! {
            impl Clone for Users {
                fn clone(&self) -> Self {
                    unimplemented!()
                }
            }
        };
        assert!(service_from_impl(&item).unwrap().is_none());
    }

    #[test]
    fn wrong_parameter_count_is_an_error() {
        let item: ItemImpl = parse_quote! {
            impl Users {
                pub async fn broken(&self, a: String, b: String) -> Result<User, Error> {
                    unimplemented!()
                }
            }
        };
        assert!(matches!(
            service_from_impl(&item),
            Err(ExtractError::WrongParameterCount { .. })
        ));
    }
}
