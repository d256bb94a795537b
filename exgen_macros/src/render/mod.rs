//! Artifact rendering: structured emission plans into Rust items.
//!
//! Each artifact becomes one `generated_*` submodule plus a glob
//! re-export, appended to the processed module. Engine-level names
//! arrive in the markers' camel convention and are converted to
//! snake_case here.
//!
//! # Example output
//!
//! For a `NotFoundError` artifact with a cached singleton, one factory
//! and a cached value accessor:
//!
//! ```rust,ignore
//! pub mod generated_not_found_error {
//!     use super::*;
//!     use super::USER_NOT_FOUND;
//!
//!     static CACHED_INSTANCE: std::sync::LazyLock<NotFoundError> =
//!         std::sync::LazyLock::new(NotFoundError::new);
//!
//!     impl NotFoundError {
//!         pub fn get() -> &'static NotFoundError { &*CACHED_INSTANCE }
//!         pub fn make(subject: String) -> NotFoundError { NotFoundError::for_subject(subject) }
//!         pub fn user_not_found() -> &'static NotFoundError { &*USER_NOT_FOUND }
//!     }
//! }
//! pub use self::generated_not_found_error::*;
//! ```

use std::collections::HashSet;

use heck::{ToSnakeCase, ToUpperCamelCase};
use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::Ident;

use exgen_core::{Artifact, BodyTemplate, Constructor, EmissionPlan, Receiver, TypeRef};

use crate::host::ModuleHost;

pub fn render_artifacts(artifacts: &[Artifact], host: &ModuleHost) -> syn::Result<Vec<syn::Item>> {
    let mut items = Vec::with_capacity(artifacts.len() * 2);
    for artifact in artifacts {
        let (module, reexport) = render_artifact(artifact, host)?;
        items.push(module);
        items.push(reexport);
    }
    Ok(items)
}

fn render_artifact(artifact: &Artifact, host: &ModuleHost) -> syn::Result<(syn::Item, syn::Item)> {
    let module_ident = format_ident!("{}", artifact.key.name.to_snake_case());
    let owner = ident_for(&artifact.owner.name)?;
    let imports = render_imports(artifact)?;
    let singleton = render_singleton(artifact, &owner)?;

    let mut used_names: HashSet<String> = HashSet::new();
    let mut methods = Vec::new();
    let mut extensions = Vec::new();
    for plan in &artifact.plans {
        match &plan.receiver {
            Receiver::Anchor(_) => {
                methods.push(render_method(artifact, plan, &owner, host, &mut used_names)?);
            }
            Receiver::OptionalOf(target) => {
                extensions.push(render_or_throw(plan, target, &owner, &mut used_names)?);
            }
        }
    }

    let impl_block = if methods.is_empty() {
        TokenStream::new()
    } else {
        quote! {
            impl #owner {
                #(#methods)*
            }
        }
    };

    let module = syn::parse2(quote! {
        pub mod #module_ident {
            use super::*;
            #(#imports)*
            #singleton
            #impl_block
            #(#extensions)*
        }
    })?;
    let reexport = syn::parse2(quote! {
        pub use self::#module_ident::*;
    })?;
    Ok((module, reexport))
}

/// The artifact's import set, rendered relative to the generated
/// submodule. Sibling declarations come in through `super::`.
fn render_imports(artifact: &Artifact) -> syn::Result<Vec<TokenStream>> {
    let mut imports = Vec::new();
    for path in &artifact.imports {
        let (namespace, name) = match path.rsplit_once("::") {
            Some(parts) => parts,
            // A bare name is already visible through the glob.
            None => continue,
        };
        let name = ident_for(name)?;
        if namespace == artifact.key.namespace {
            imports.push(quote! { use super::#name; });
        } else {
            let prefix = syn::parse_str::<syn::Path>(namespace).map_err(|_| {
                syn::Error::new(
                    Span::call_site(),
                    format!("`{path}` is not a valid import path"),
                )
            })?;
            imports.push(quote! { use #prefix::#name; });
        }
    }
    Ok(imports)
}

fn render_singleton(artifact: &Artifact, owner: &Ident) -> syn::Result<TokenStream> {
    let Some(singleton) = &artifact.singleton else {
        return Ok(TokenStream::new());
    };
    let field = ident_for(&singleton.name)?;
    let callee = ident_for(&singleton.constructor.callee)?;
    // Process-wide, created on first access, never mutated.
    Ok(quote! {
        static #field: std::sync::LazyLock<#owner> = std::sync::LazyLock::new(#owner::#callee);
    })
}

fn render_method(
    artifact: &Artifact,
    plan: &EmissionPlan,
    owner: &Ident,
    host: &ModuleHost,
    used_names: &mut HashSet<String>,
) -> syn::Result<TokenStream> {
    match &plan.body {
        BodyTemplate::ReturnCached => {
            let Some(singleton) = &artifact.singleton else {
                return Err(syn::Error::new(
                    Span::call_site(),
                    format!(
                        "internal error: cached accessor for `{}` has no singleton field",
                        artifact.owner
                    ),
                ));
            };
            let name = method_ident(&plan.name, used_names)?;
            let field = ident_for(&singleton.name)?;
            Ok(quote! {
                pub fn #name() -> &'static #owner {
                    &*#field
                }
            })
        }
        BodyTemplate::ReturnConstructed(ctor) => {
            let name = factory_ident(&plan.name, ctor, used_names)?;
            let callee = ident_for(&ctor.callee)?;
            let mut names = Vec::with_capacity(plan.params.len());
            let mut types = Vec::with_capacity(plan.params.len());
            for param in &plan.params {
                names.push(ident_for(&param.name)?);
                types.push(type_for(&param.ty)?);
            }
            Ok(quote! {
                pub fn #name(#(#names: #types),*) -> #owner {
                    #owner::#callee(#(#names),*)
                }
            })
        }
        BodyTemplate::ReturnValueRef(value) => {
            let name = method_ident(&plan.name, used_names)?;
            let value_ident = ident_for(&value.name)?;
            let body = if host.is_lazy(&value.name) {
                quote!(&*#value_ident)
            } else {
                quote!(&#value_ident)
            };
            Ok(quote! {
                pub fn #name() -> &'static #owner {
                    #body
                }
            })
        }
        BodyTemplate::ReturnOrThrow { .. } => Err(syn::Error::new(
            Span::call_site(),
            "internal error: unwrap-or-throw plan on a companion anchor",
        )),
    }
}

fn render_or_throw(
    plan: &EmissionPlan,
    target: &TypeRef,
    owner: &Ident,
    used_names: &mut HashSet<String>,
) -> syn::Result<TokenStream> {
    let BodyTemplate::ReturnOrThrow { raise } = &plan.body else {
        return Err(syn::Error::new(
            Span::call_site(),
            "internal error: optional receiver without an unwrap-or-throw body",
        ));
    };
    // Two values on one owner can resolve to the same method name;
    // the raising value's own name keeps the extensions apart.
    let mut name = plan.name.to_snake_case();
    if used_names.contains(&name) {
        name = format!("{}_{}", name, raise.name.to_snake_case());
    }
    used_names.insert(name.clone());
    let method = ident_for(&name)?;
    let trait_ident = format_ident!("{}Ext", name.to_upper_camel_case());
    let target_ident = ident_for(&target.name)?;
    let raise_ident = ident_for(&raise.name)?;
    Ok(quote! {
        pub trait #trait_ident {
            fn #method(self) -> Result<#target_ident, #owner>;
        }
        impl #trait_ident for Option<#target_ident> {
            fn #method(self) -> Result<#target_ident, #owner> {
                match self {
                    Some(value) => Ok(value),
                    None => Err(#raise_ident.clone()),
                }
            }
        }
    })
}

fn ident_for(raw: &str) -> syn::Result<Ident> {
    syn::parse_str(raw).map_err(|_| {
        syn::Error::new(
            Span::call_site(),
            format!("`{raw}` is not a valid identifier"),
        )
    })
}

fn type_for(raw: &str) -> syn::Result<syn::Type> {
    syn::parse_str(raw).map_err(|_| {
        syn::Error::new(Span::call_site(), format!("`{raw}` is not a valid type"))
    })
}

fn method_ident(engine_name: &str, used_names: &mut HashSet<String>) -> syn::Result<Ident> {
    let name = engine_name.to_snake_case();
    used_names.insert(name.clone());
    ident_for(&name)
}

/// Factory plans all carry the same engine-level name; Rust has no
/// overloading, so later factories for the same owner take a suffix
/// derived from their constructor's own name.
fn factory_ident(
    engine_name: &str,
    ctor: &Constructor,
    used_names: &mut HashSet<String>,
) -> syn::Result<Ident> {
    let mut name = engine_name.to_snake_case();
    if used_names.contains(&name) {
        let suffix = ctor
            .callee
            .trim_start_matches("new")
            .trim_start_matches('_')
            .to_snake_case();
        name = if suffix.is_empty() {
            format!("{}_{}", name, used_names.len())
        } else {
            format!("{name}_{suffix}")
        };
    }
    used_names.insert(name.clone());
    ident_for(&name)
}
