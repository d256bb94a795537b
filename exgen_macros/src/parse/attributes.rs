//! Marker attribute parsing.
//!
//! Markers are parsed into the engine's typed records here; anything
//! malformed becomes a `syn::Error` that fails the whole macro
//! invocation before the engine runs.

use exgen_core::{CachedValueMarker, ExceptionMarker, TypeTarget, UnwrapOrThrowMarker};
use syn::{Attribute, LitStr};

pub const EXCEPTION: &str = "exception";
pub const CACHED: &str = "cached";
pub const OR_THROW: &str = "or_throw";
pub const CONSTRUCTOR: &str = "constructor";

/// The attribute names this crate consumes and strips.
pub const MARKERS: [&str; 4] = [EXCEPTION, CACHED, OR_THROW, CONSTRUCTOR];

pub fn find_marker<'a>(attrs: &'a [Attribute], name: &str) -> Option<&'a Attribute> {
    attrs.iter().find(|attr| attr.path().is_ident(name))
}

pub fn is_marker(attr: &Attribute) -> bool {
    MARKERS.iter().any(|name| attr.path().is_ident(name))
}

/// `#[exception]`, `#[exception(cache_no_args)]`,
/// `#[exception(cache_no_args, accessor = "instance")]`
pub fn parse_exception(attr: &Attribute) -> syn::Result<ExceptionMarker> {
    let mut marker = ExceptionMarker::default();
    if matches!(attr.meta, syn::Meta::Path(_)) {
        return Ok(marker);
    }
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("cache_no_args") {
            marker.cache_no_args = true;
            Ok(())
        } else if meta.path.is_ident("accessor") {
            let name: LitStr = meta.value()?.parse()?;
            marker.cached_accessor_name = name.value();
            Ok(())
        } else {
            Err(meta.error("expected `cache_no_args` or `accessor = \"...\"`"))
        }
    })?;
    Ok(marker)
}

/// `#[cached]` or `#[cached(method = "userNotFound")]`
pub fn parse_cached(attr: &Attribute) -> syn::Result<CachedValueMarker> {
    let mut marker = CachedValueMarker::default();
    if matches!(attr.meta, syn::Meta::Path(_)) {
        return Ok(marker);
    }
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("method") {
            let name: LitStr = meta.value()?.parse()?;
            marker.method_name = name.value();
            Ok(())
        } else {
            Err(meta.error("expected `method = \"...\"`"))
        }
    })?;
    Ok(marker)
}

/// `#[or_throw(Type)]` or `#[or_throw(path::To::Type, method = "...")]`
pub fn parse_or_throw(attr: &Attribute) -> syn::Result<UnwrapOrThrowMarker> {
    let mut target: Option<String> = None;
    let mut method = String::new();
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("method") {
            let name: LitStr = meta.value()?.parse()?;
            method = name.value();
            Ok(())
        } else if target.is_none() {
            target = Some(path_display(&meta.path));
            Ok(())
        } else {
            Err(meta.error("expected a single target type"))
        }
    })?;
    let Some(path) = target else {
        return Err(syn::Error::new_spanned(
            attr,
            "`or_throw` needs a target type, e.g. `#[or_throw(User)]`",
        ));
    };
    Ok(UnwrapOrThrowMarker {
        // The path may name a type that only exists after other
        // macros ran; the planner normalizes it either way.
        target: TypeTarget::Forward(path),
        method_name: method,
    })
}

pub fn path_display(path: &syn::Path) -> String {
    path.segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect::<Vec<_>>()
        .join("::")
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn exception_defaults() {
        let attr: Attribute = parse_quote!(#[exception]);
        let marker = parse_exception(&attr).unwrap();
        assert!(!marker.cache_no_args);
        assert_eq!(marker.cached_accessor_name, "get");
    }

    #[test]
    fn exception_with_flags() {
        let attr: Attribute = parse_quote!(#[exception(cache_no_args, accessor = "instance")]);
        let marker = parse_exception(&attr).unwrap();
        assert!(marker.cache_no_args);
        assert_eq!(marker.cached_accessor_name, "instance");
    }

    #[test]
    fn exception_rejects_unknown_keys() {
        let attr: Attribute = parse_quote!(#[exception(cache_everything)]);
        assert!(parse_exception(&attr).is_err());
    }

    #[test]
    fn cached_method_name() {
        let attr: Attribute = parse_quote!(#[cached(method = "userNotFound")]);
        let marker = parse_cached(&attr).unwrap();
        assert_eq!(marker.method_name, "userNotFound");

        let bare: Attribute = parse_quote!(#[cached]);
        assert_eq!(parse_cached(&bare).unwrap().method_name, "");
    }

    #[test]
    fn or_throw_target_and_method() {
        let attr: Attribute = parse_quote!(#[or_throw(crate::models::User, method = "take")]);
        let marker = parse_or_throw(&attr).unwrap();
        assert_eq!(
            marker.target,
            exgen_core::TypeTarget::Forward("crate::models::User".to_owned())
        );
        assert_eq!(marker.method_name, "take");
    }

    #[test]
    fn or_throw_requires_a_target() {
        let attr: Attribute = parse_quote!(#[or_throw(method = "take")]);
        assert!(parse_or_throw(&attr).is_err());
    }
}
