//! Declaration records as exposed by the host symbol table.
//!
//! Everything here is a read-only input, re-derived fresh on every
//! generation run. The engine never mutates a declaration.

use std::fmt;

/// Accessor name used when an exception marker leaves it blank.
pub const DEFAULT_ACCESSOR: &str = "get";

/// Normalized reference to a concrete type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeRef {
    pub namespace: String,
    pub name: String,
}

impl TypeRef {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        TypeRef {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Parse a `::`-separated path into a reference. Returns `None`
    /// when the path is not a plain concrete path (empty, generic
    /// arguments, stray whitespace).
    pub fn parse(path: &str) -> Option<TypeRef> {
        let trimmed = path.trim();
        if trimmed.is_empty() || trimmed.contains(['<', '>', '(', ' ']) {
            return None;
        }
        let mut segments: Vec<&str> = trimmed.split("::").collect();
        if segments.iter().any(|s| s.is_empty()) {
            return None;
        }
        let name = segments.pop()?;
        Some(TypeRef::new(segments.join("::"), name))
    }

    pub fn qualified(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.namespace, self.name)
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified())
    }
}

/// Identity of a declaration: enclosing namespace plus simple name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub namespace: String,
    pub name: String,
}

impl QualifiedName {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        QualifiedName {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    pub fn qualified(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.namespace, self.name)
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified())
    }
}

/// One constructor parameter. The modifier flags come from the host's
/// source language and travel through planning untouched; a host whose
/// language has no varargs simply never sets them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    /// Display form of the declared type; only the host interprets it.
    pub ty: String,
    pub variadic: bool,
    pub pass_through: bool,
}

impl Param {
    pub fn plain(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Param {
            name: name.into(),
            ty: ty.into(),
            variadic: false,
            pass_through: false,
        }
    }
}

/// A constructor signature of a type declaration. `callee` is the
/// name of the function a generated factory forwards to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constructor {
    pub callee: String,
    pub params: Vec<Param>,
}

impl Constructor {
    pub fn new(callee: impl Into<String>, params: Vec<Param>) -> Self {
        Constructor {
            callee: callee.into(),
            params,
        }
    }

    pub fn is_no_args(&self) -> bool {
        self.params.is_empty()
    }
}

/// The attachment point generated members are added to. For the Rust
/// host this is the type's own inherent-impl namespace; it exists iff
/// the type is declared inside the processed scope. Presence is all
/// that matters: the planner gates on it, and the renderer derives
/// the attachment from the owning type itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor;

/// A user-defined type declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub ty: TypeRef,
    pub constructors: Vec<Constructor>,
    pub anchor: Option<Anchor>,
}

impl TypeDecl {
    pub fn no_args_constructor(&self) -> Option<&Constructor> {
        self.constructors.iter().find(|c| c.is_no_args())
    }
}

/// A user-defined value declaration (a `static` for the Rust host),
/// with its declared type in display form.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueDecl {
    pub name: QualifiedName,
    pub ty: String,
}

/// Marker on a type requesting factory methods and, optionally, a
/// cached singleton accessor. Caching is opt-in.
#[derive(Debug, Clone, PartialEq)]
pub struct ExceptionMarker {
    pub cache_no_args: bool,
    pub cached_accessor_name: String,
}

impl Default for ExceptionMarker {
    fn default() -> Self {
        ExceptionMarker {
            cache_no_args: false,
            cached_accessor_name: DEFAULT_ACCESSOR.to_owned(),
        }
    }
}

/// Marker on a value requesting an accessor that hands out the value
/// itself, never a reconstruction of it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CachedValueMarker {
    pub method_name: String,
}

/// Marker on a value requesting an unwrap-or-raise extension on an
/// optional of `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnwrapOrThrowMarker {
    pub target: TypeTarget,
    pub method_name: String,
}

/// A marker's type argument: either already resolved by the host, or
/// a forward reference the planner must normalize before emission.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeTarget {
    Resolved(TypeRef),
    Forward(String),
}

impl fmt::Display for TypeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTarget::Resolved(ty) => f.write_str(&ty.qualified()),
            TypeTarget::Forward(path) => f.write_str(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_plain_paths() {
        let ty = TypeRef::parse("crate::models::User").unwrap();
        assert_eq!(ty.namespace, "crate::models");
        assert_eq!(ty.name, "User");
        assert_eq!(ty.qualified(), "crate::models::User");

        let bare = TypeRef::parse("User").unwrap();
        assert_eq!(bare.namespace, "");
        assert_eq!(bare.qualified(), "User");
    }

    #[test]
    fn parse_rejects_non_concrete_paths() {
        assert_eq!(TypeRef::parse(""), None);
        assert_eq!(TypeRef::parse("Option<User>"), None);
        assert_eq!(TypeRef::parse("a::::b"), None);
    }
}
