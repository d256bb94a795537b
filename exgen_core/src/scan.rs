//! Declaration scanning over an injected host symbol facility.

use crate::decl::{
    CachedValueMarker, ExceptionMarker, TypeDecl, UnwrapOrThrowMarker, ValueDecl,
};

/// The host symbol-resolution facility.
///
/// Implemented by the proc-macro front end over a visited module, and
/// by fake declaration sets in engine tests. The host is treated as an
/// immutable snapshot for the duration of one run.
pub trait SymbolHost {
    /// Type declarations carrying an exception marker.
    fn exception_types(&self) -> Vec<(TypeDecl, ExceptionMarker)>;

    /// Value declarations carrying a cached-value marker.
    fn cached_values(&self) -> Vec<(ValueDecl, CachedValueMarker)>;

    /// Value declarations carrying an unwrap-or-throw marker.
    fn or_throw_values(&self) -> Vec<(ValueDecl, UnwrapOrThrowMarker)>;

    /// Resolve a type path to its declaration, if the host knows it.
    fn resolve_type(&self, path: &str) -> Option<TypeDecl>;
}

/// The three disjoint marked-declaration collections of one run.
#[derive(Debug, Clone, Default)]
pub struct ScanOutput {
    pub exception_types: Vec<(TypeDecl, ExceptionMarker)>,
    pub cached_values: Vec<(ValueDecl, CachedValueMarker)>,
    pub or_throw_values: Vec<(ValueDecl, UnwrapOrThrowMarker)>,
}

/// Pull the full marked-declaration snapshot for one generation run.
///
/// The scanner does not cross-reference: a marked value whose declared
/// type is unknown is still returned here, and the planner decides
/// per target type whether that is fatal.
pub fn scan(host: &dyn SymbolHost) -> ScanOutput {
    ScanOutput {
        exception_types: host.exception_types(),
        cached_values: host.cached_values(),
        or_throw_values: host.or_throw_values(),
    }
}
