//! `SymbolHost` implementation over a visited module.

use std::collections::BTreeSet;

use exgen_core::{
    Anchor, CachedValueMarker, Constructor, ExceptionMarker, Param, QualifiedName, SymbolHost,
    TypeDecl, TypeRef, UnwrapOrThrowMarker, ValueDecl,
};

use crate::item_info::type_display;
use crate::visitors::module_visitor::ModuleVisitor;

/// A frozen snapshot of one module's declarations, serving as the
/// engine's symbol-resolution facility for a single macro invocation.
pub struct ModuleHost {
    types: Vec<TypeDecl>,
    exception_types: Vec<(TypeDecl, ExceptionMarker)>,
    cached_values: Vec<(ValueDecl, CachedValueMarker)>,
    or_throw_values: Vec<(ValueDecl, UnwrapOrThrowMarker)>,
    lazy_values: BTreeSet<String>,
}

impl ModuleHost {
    pub fn from_visitor(visitor: &ModuleVisitor) -> Self {
        let namespace = visitor.namespace.clone();

        let types: Vec<TypeDecl> = visitor
            .local_types
            .iter()
            .map(|ident| {
                let constructors = visitor
                    .constructors
                    .iter()
                    .filter(|ctor| ctor.owner == *ident)
                    .map(|ctor| {
                        Constructor::new(
                            ctor.callee.to_string(),
                            ctor.params
                                .iter()
                                .map(|(name, ty)| Param::plain(name.to_string(), type_display(ty)))
                                .collect(),
                        )
                    })
                    .collect();
                TypeDecl {
                    ty: TypeRef::new(namespace.clone(), ident.to_string()),
                    constructors,
                    // Declared inside the processed module, so the
                    // inherent-impl attachment point always exists.
                    anchor: Some(Anchor),
                }
            })
            .collect();

        let find = |ident: &syn::Ident| {
            types
                .iter()
                .find(|decl| decl.ty.name == ident.to_string())
                .cloned()
        };

        let exception_types = visitor
            .exception_types
            .iter()
            .filter_map(|info| find(&info.ident).map(|decl| (decl, info.marker.clone())))
            .collect();

        let value = |ident: &syn::Ident, ty: &crate::item_info::ValueType| ValueDecl {
            name: QualifiedName::new(namespace.clone(), ident.to_string()),
            ty: ty.display(),
        };
        let cached_values = visitor
            .cached_values
            .iter()
            .map(|info| (value(&info.ident, &info.ty), info.marker.clone()))
            .collect();
        let or_throw_values = visitor
            .or_throw_values
            .iter()
            .map(|info| (value(&info.ident, &info.ty), info.marker.clone()))
            .collect();

        let lazy_values = visitor
            .cached_values
            .iter()
            .map(|info| (&info.ident, info.ty.lazy))
            .chain(
                visitor
                    .or_throw_values
                    .iter()
                    .map(|info| (&info.ident, info.ty.lazy)),
            )
            .filter(|(_, lazy)| *lazy)
            .map(|(ident, _)| ident.to_string())
            .collect();

        ModuleHost {
            types,
            exception_types,
            cached_values,
            or_throw_values,
            lazy_values,
        }
    }

    /// Whether a marked value's static is behind a lazy-init wrapper
    /// the generated code must deref through.
    pub fn is_lazy(&self, value_name: &str) -> bool {
        self.lazy_values.contains(value_name)
    }
}

impl SymbolHost for ModuleHost {
    fn exception_types(&self) -> Vec<(TypeDecl, ExceptionMarker)> {
        self.exception_types.clone()
    }

    fn cached_values(&self) -> Vec<(ValueDecl, CachedValueMarker)> {
        self.cached_values.clone()
    }

    fn or_throw_values(&self) -> Vec<(ValueDecl, UnwrapOrThrowMarker)> {
        self.or_throw_values.clone()
    }

    fn resolve_type(&self, path: &str) -> Option<TypeDecl> {
        self.types
            .iter()
            .find(|decl| decl.ty.name == path || decl.ty.qualified() == path)
            .cloned()
    }
}
