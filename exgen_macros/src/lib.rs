use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemMod, parse_macro_input, visit::Visit};

use crate::host::ModuleHost;
use crate::visitors::module_visitor::ModuleVisitor;

mod host;
mod item_info;
mod parse;
mod render;
mod util;
mod visitors;

/// Generates exception boilerplate for every marked item in a module.
///
/// The macro scans the module for marker attributes, plans one
/// generated member per marker rule, and appends the result as one
/// `generated_*` submodule per owning type (re-exported into the
/// module, so callers only need the module itself in scope).
///
/// # Markers
///
/// - [`macro@exception`] on a struct or enum: `make` factories for its
///   constructors, plus a cached singleton accessor when
///   `cache_no_args` is set
/// - [`macro@cached`] on a `static`: an accessor on the value's type
///   that hands out that very instance
/// - [`macro@or_throw`] on a `static`: an `Option` extension that
///   unwraps or raises the value
/// - [`macro@constructor`] on an associated function: marks it as a
///   factory target (functions named `new` count automatically)
///
/// # Example
///
/// ```
/// use exgen_macros::exgen_module;
///
/// #[exgen_module]
/// pub mod app_errors {
///     #[exception(cache_no_args)]
///     #[derive(Debug, Clone)]
///     pub struct QueueClosed;
///
///     impl QueueClosed {
///         pub fn new() -> Self {
///             QueueClosed
///         }
///     }
/// }
///
/// // Generated: a process-wide cached instance behind
/// // `app_errors::QueueClosed::get() -> &'static QueueClosed`.
/// let first = app_errors::QueueClosed::get();
/// assert!(std::ptr::eq(first, app_errors::QueueClosed::get()));
/// ```
///
/// Generation is all-or-nothing: a bad marker or an unresolvable
/// target type fails the whole macro invocation with a compile error
/// naming the offending declaration.
#[proc_macro_attribute]
pub fn exgen_module(_args: TokenStream, input: TokenStream) -> TokenStream {
    let mut module = parse_macro_input!(input as ItemMod);
    match expand(&mut module) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(module: &mut ItemMod) -> syn::Result<proc_macro2::TokenStream> {
    if module.content.is_none() {
        return Err(syn::Error::new_spanned(
            &module.ident,
            "`exgen_module` needs an inline module body",
        ));
    }

    let mut visitor = ModuleVisitor::default();
    visitor.visit_item_mod(module);
    if let Some(err) = visitor.take_error() {
        return Err(err);
    }

    let host = ModuleHost::from_visitor(&visitor);
    let artifacts = exgen_core::build_artifacts(&host)
        .map_err(|err| syn::Error::new_spanned(&module.ident, err.to_string()))?;
    let generated = render::render_artifacts(&artifacts, &host)?;

    util::strip_markers(module);
    if let Some((_, items)) = &mut module.content {
        items.extend(generated);
    }
    Ok(quote! { #module })
}

/// Marks an exception type for boilerplate generation inside an
/// [`macro@exgen_module`] module.
///
/// - `#[exception]` generates one `make` factory per constructor.
/// - `#[exception(cache_no_args)]` additionally caches one instance
///   built from the zero-parameter constructor behind a `get`
///   accessor (rename it with `accessor = "..."`). The zero-parameter
///   constructor must exist, and caching is opt-in.
///
/// Standalone this attribute is a pass-through.
#[proc_macro_attribute]
pub fn exception(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}

/// Marks a `static` as a cached exception value: its type gains an
/// accessor returning that very instance (`static USER_NOT_FOUND_EXCEPTION`
/// of type `NotFoundError` yields `NotFoundError::user_not_found()`).
/// Rename with `#[cached(method = "...")]`.
///
/// Standalone this attribute is a pass-through.
#[proc_macro_attribute]
pub fn cached(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}

/// Marks a `static` as the error raised by a generated `Option`
/// extension: `#[or_throw(User)]` on `NO_USER` yields
/// `Option<User>::or_throw_no_user() -> Result<User, _>` returning a
/// clone of `NO_USER` on `None`. Rename with `method = "..."`.
///
/// Standalone this attribute is a pass-through.
#[proc_macro_attribute]
pub fn or_throw(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}

/// Marks an associated function as a factory target for
/// [`macro@exception`] generation. Functions named `new` are picked up
/// without it.
///
/// Standalone this attribute is a pass-through.
#[proc_macro_attribute]
pub fn constructor(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}
