//! Typed records extracted from a visited module.

use exgen_core::{CachedValueMarker, ExceptionMarker, UnwrapOrThrowMarker};
use syn::Ident;

/// A struct or enum carrying `#[exception]`.
pub struct ExceptionTypeInfo {
    pub ident: Ident,
    pub marker: ExceptionMarker,
}

/// A `static` carrying `#[cached]`.
pub struct CachedValueInfo {
    pub ident: Ident,
    pub ty: ValueType,
    pub marker: CachedValueMarker,
}

/// A `static` carrying `#[or_throw(...)]`.
pub struct OrThrowValueInfo {
    pub ident: Ident,
    pub ty: ValueType,
    pub marker: UnwrapOrThrowMarker,
}

/// An associated function usable as a factory target.
pub struct ConstructorInfo {
    pub owner: Ident,
    pub callee: Ident,
    pub params: Vec<(Ident, syn::Type)>,
}

/// The declared type of a marked static, with lazy-initialization
/// wrappers peeled off.
#[derive(Clone)]
pub struct ValueType {
    pub ty: syn::Type,
    pub lazy: bool,
}

impl ValueType {
    /// `LazyLock<T>` and `Lazy<T>` statics declare a value of type `T`
    /// that the generated code reaches through a deref.
    pub fn peel(ty: &syn::Type) -> Self {
        if let syn::Type::Path(path) = ty
            && let Some(segment) = path.path.segments.last()
            && (segment.ident == "LazyLock" || segment.ident == "Lazy")
            && let syn::PathArguments::AngleBracketed(args) = &segment.arguments
            && let Some(syn::GenericArgument::Type(inner)) = args.args.first()
        {
            return ValueType {
                ty: inner.clone(),
                lazy: true,
            };
        }
        ValueType {
            ty: ty.clone(),
            lazy: false,
        }
    }

    pub fn display(&self) -> String {
        type_display(&self.ty)
    }
}

/// Whitespace-free display form of a type, matching the engine's
/// opaque type strings.
pub fn type_display(ty: &syn::Type) -> String {
    quote::quote!(#ty)
        .to_string()
        .split_whitespace()
        .collect()
}
