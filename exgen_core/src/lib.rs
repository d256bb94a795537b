//! Generation engine for marker-driven exception boilerplate.
//!
//! The engine consumes a declaration snapshot from a host
//! symbol-resolution facility (anything implementing [`SymbolHost`])
//! and produces per-owning-type [`Artifact`]s: ordered lists of
//! [`EmissionPlan`]s describing the members a renderer should
//! synthesize. The engine itself never touches source text; parsing
//! and rendering live in the host (see the `exgen_macros` crate for
//! the proc-macro binding).
//!
//! One run is a single-threaded batch computation over a frozen
//! snapshot. Nothing is cached between runs; identical input yields
//! identical artifacts.

pub mod artifact;
pub mod decl;
pub mod error;
pub mod naming;
pub mod plan;
pub mod scan;

pub use artifact::{Artifact, ArtifactKey, ArtifactSet, SingletonField};
pub use decl::{
    Anchor, CachedValueMarker, Constructor, ExceptionMarker, Param, QualifiedName, TypeDecl,
    TypeRef, TypeTarget, UnwrapOrThrowMarker, ValueDecl,
};
pub use error::GenerateError;
pub use plan::{BodyTemplate, EmissionPlan, Receiver, build_artifacts};
pub use scan::{ScanOutput, SymbolHost, scan};
