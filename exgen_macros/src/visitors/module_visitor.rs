//! Module traversal collecting marked declarations.

use syn::visit::{self, Visit};
use syn::{Attribute, Ident, ItemImpl, ItemMod, ItemStatic};

use crate::item_info::{
    CachedValueInfo, ConstructorInfo, ExceptionTypeInfo, OrThrowValueInfo, ValueType, type_display,
};
use crate::parse::attributes;

/// Collects every declaration of the processed module that the engine
/// needs: marked types and statics, all locally declared type names
/// (resolution targets and companion anchors), and constructor
/// candidates from inherent impl blocks.
#[derive(Default)]
pub struct ModuleVisitor {
    pub namespace: String,
    pub exception_types: Vec<ExceptionTypeInfo>,
    pub cached_values: Vec<CachedValueInfo>,
    pub or_throw_values: Vec<OrThrowValueInfo>,
    pub local_types: Vec<Ident>,
    pub constructors: Vec<ConstructorInfo>,
    error: Option<syn::Error>,
}

impl ModuleVisitor {
    pub fn take_error(&mut self) -> Option<syn::Error> {
        self.error.take()
    }

    fn record_error(&mut self, err: syn::Error) {
        match &mut self.error {
            Some(existing) => existing.combine(err),
            None => self.error = Some(err),
        }
    }

    fn collect_exception_marker(&mut self, ident: &Ident, attrs: &[Attribute]) {
        let Some(attr) = attributes::find_marker(attrs, attributes::EXCEPTION) else {
            return;
        };
        match attributes::parse_exception(attr) {
            Ok(marker) => self.exception_types.push(ExceptionTypeInfo {
                ident: ident.clone(),
                marker,
            }),
            Err(err) => self.record_error(err),
        }
    }
}

impl<'ast> Visit<'ast> for ModuleVisitor {
    fn visit_item_mod(&mut self, item: &'ast ItemMod) {
        // Only the outermost module is in scope for one run; nested
        // modules keep their own namespaces.
        if self.namespace.is_empty() {
            self.namespace = item.ident.to_string();
            visit::visit_item_mod(self, item);
        }
    }

    fn visit_item_struct(&mut self, item: &'ast syn::ItemStruct) {
        self.local_types.push(item.ident.clone());
        self.collect_exception_marker(&item.ident, &item.attrs);
    }

    fn visit_item_enum(&mut self, item: &'ast syn::ItemEnum) {
        self.local_types.push(item.ident.clone());
        self.collect_exception_marker(&item.ident, &item.attrs);
    }

    fn visit_item_static(&mut self, item: &'ast ItemStatic) {
        if let Some(attr) = attributes::find_marker(&item.attrs, attributes::CACHED) {
            match attributes::parse_cached(attr) {
                Ok(marker) => self.cached_values.push(CachedValueInfo {
                    ident: item.ident.clone(),
                    ty: ValueType::peel(&item.ty),
                    marker,
                }),
                Err(err) => self.record_error(err),
            }
        }
        if let Some(attr) = attributes::find_marker(&item.attrs, attributes::OR_THROW) {
            match attributes::parse_or_throw(attr) {
                Ok(marker) => self.or_throw_values.push(OrThrowValueInfo {
                    ident: item.ident.clone(),
                    ty: ValueType::peel(&item.ty),
                    marker,
                }),
                Err(err) => self.record_error(err),
            }
        }
    }

    fn visit_item_impl(&mut self, item: &'ast ItemImpl) {
        if item.trait_.is_some() {
            return;
        }
        let syn::Type::Path(self_ty) = item.self_ty.as_ref() else {
            return;
        };
        let Some(owner) = self_ty.path.get_ident().cloned() else {
            return;
        };
        for impl_item in &item.items {
            let syn::ImplItem::Fn(func) = impl_item else {
                continue;
            };
            let marked =
                attributes::find_marker(&func.attrs, attributes::CONSTRUCTOR).is_some();
            if !marked && func.sig.ident != "new" {
                continue;
            }
            if !returns_owner(&func.sig, &owner) {
                if marked {
                    self.record_error(syn::Error::new_spanned(
                        &func.sig,
                        format!("a constructor of `{owner}` must return `Self` or `{owner}`"),
                    ));
                }
                continue;
            }
            match constructor_info(&owner, func) {
                Ok(info) => self.constructors.push(info),
                Err(err) => self.record_error(err),
            }
        }
    }
}

fn returns_owner(sig: &syn::Signature, owner: &Ident) -> bool {
    match &sig.output {
        syn::ReturnType::Default => false,
        syn::ReturnType::Type(_, ty) => {
            let rendered = type_display(ty);
            rendered == "Self" || rendered == owner.to_string()
        }
    }
}

fn constructor_info(owner: &Ident, func: &syn::ImplItemFn) -> syn::Result<ConstructorInfo> {
    let mut params = Vec::new();
    for input in &func.sig.inputs {
        match input {
            syn::FnArg::Receiver(receiver) => {
                return Err(syn::Error::new_spanned(
                    receiver,
                    "constructors cannot take `self`",
                ));
            }
            syn::FnArg::Typed(pat) => {
                let syn::Pat::Ident(name) = pat.pat.as_ref() else {
                    return Err(syn::Error::new_spanned(
                        &pat.pat,
                        "constructor parameters must be plain named bindings",
                    ));
                };
                params.push((name.ident.clone(), (*pat.ty).clone()));
            }
        }
    }
    Ok(ConstructorInfo {
        owner: owner.clone(),
        callee: func.sig.ident.clone(),
        params,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn visit(module: &ItemMod) -> ModuleVisitor {
        let mut visitor = ModuleVisitor::default();
        visitor.visit_item_mod(module);
        visitor
    }

    #[test]
    fn collects_marked_items_and_constructors() {
        let module: ItemMod = parse_quote! {
            mod app {
                #[exception(cache_no_args)]
                pub struct QueueClosed;

                impl QueueClosed {
                    pub fn new() -> Self {
                        QueueClosed
                    }

                    #[constructor]
                    pub fn with_reason(reason: String) -> QueueClosed {
                        let _ = reason;
                        QueueClosed
                    }

                    pub fn helper(&self) -> bool {
                        true
                    }
                }

                #[cached]
                pub static QUEUE_CLOSED: std::sync::LazyLock<QueueClosed> =
                    std::sync::LazyLock::new(QueueClosed::new);
            }
        };

        let mut visitor = visit(&module);
        assert!(visitor.take_error().is_none());
        assert_eq!(visitor.namespace, "app");
        assert_eq!(visitor.exception_types.len(), 1);
        assert!(visitor.exception_types[0].marker.cache_no_args);
        assert_eq!(visitor.local_types.len(), 1);

        let callees: Vec<_> = visitor
            .constructors
            .iter()
            .map(|c| c.callee.to_string())
            .collect();
        assert_eq!(callees, vec!["new", "with_reason"]);

        assert_eq!(visitor.cached_values.len(), 1);
        assert!(visitor.cached_values[0].ty.lazy);
        assert_eq!(visitor.cached_values[0].ty.display(), "QueueClosed");
    }

    #[test]
    fn nested_modules_are_out_of_scope() {
        let module: ItemMod = parse_quote! {
            mod app {
                mod inner {
                    #[exception]
                    pub struct Hidden;
                }
            }
        };

        let visitor = visit(&module);
        assert!(visitor.exception_types.is_empty());
        assert!(visitor.local_types.is_empty());
    }

    #[test]
    fn malformed_marker_is_an_error() {
        let module: ItemMod = parse_quote! {
            mod app {
                #[exception(cache_everything)]
                pub struct Bad;
            }
        };

        let mut visitor = visit(&module);
        assert!(visitor.take_error().is_some());
    }
}
