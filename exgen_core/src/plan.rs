//! Per-declaration generation planning.
//!
//! For every marked declaration the planner decides which generation
//! rules apply and appends abstract emission plans to the owning
//! type's artifact. All declared return types are the owning type's
//! own precise type; the generator never widens to a supertype.

use log::debug;

use crate::artifact::{Artifact, ArtifactSet, SingletonField};
use crate::decl::{
    CachedValueMarker, Constructor, DEFAULT_ACCESSOR, ExceptionMarker, Param, QualifiedName,
    TypeDecl, TypeRef, TypeTarget, UnwrapOrThrowMarker, ValueDecl,
};
use crate::error::GenerateError;
use crate::naming::{DEFAULT_STRIP_SUFFIX, or_throw_fallback, resolve_name};
use crate::scan::{SymbolHost, scan};

/// Name of the artifact-level singleton field.
pub const SINGLETON_FIELD: &str = "CACHED_INSTANCE";

/// Name given to constructor-wrapping factory plans.
pub const FACTORY_NAME: &str = "make";

/// Receiver of a synthesized member.
#[derive(Debug, Clone, PartialEq)]
pub enum Receiver {
    /// The owning type's companion anchor.
    Anchor(TypeRef),
    /// An optional-value wrapper around the given type.
    OptionalOf(TypeRef),
}

/// Body template identifiers; the renderer decides how each one reads
/// in the target language.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyTemplate {
    /// Hand out the artifact-level singleton.
    ReturnCached,
    /// Forward all parameters to the recorded constructor.
    ReturnConstructed(Constructor),
    /// Hand out the marked value itself, never a reconstruction.
    ReturnValueRef(QualifiedName),
    /// Unwrap the optional receiver; raise the marked value when empty.
    ReturnOrThrow { raise: QualifiedName },
}

/// One synthesized member, prior to textual rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionPlan {
    pub name: String,
    pub receiver: Receiver,
    pub params: Vec<Param>,
    pub returns: TypeRef,
    pub body: BodyTemplate,
}

/// Run one full generation pass: scan the host, plan every marked
/// declaration, aggregate per owning type. Any fatal error aborts the
/// run; no partial output is returned.
pub fn build_artifacts(host: &dyn SymbolHost) -> Result<Vec<Artifact>, GenerateError> {
    let snapshot = scan(host);
    let mut artifacts = ArtifactSet::default();

    for (decl, marker) in &snapshot.exception_types {
        plan_exception_type(decl, marker, &mut artifacts)?;
    }
    for (value, marker) in &snapshot.cached_values {
        plan_cached_value(host, value, marker, &mut artifacts)?;
    }
    for (value, marker) in &snapshot.or_throw_values {
        plan_or_throw(host, value, marker, &mut artifacts)?;
    }

    Ok(artifacts.into_artifacts())
}

fn anchor_plan(owner: &TypeRef, name: String, params: Vec<Param>, body: BodyTemplate) -> EmissionPlan {
    EmissionPlan {
        name,
        receiver: Receiver::Anchor(owner.clone()),
        params,
        returns: owner.clone(),
        body,
    }
}

fn plan_exception_type(
    decl: &TypeDecl,
    marker: &ExceptionMarker,
    artifacts: &mut ArtifactSet,
) -> Result<(), GenerateError> {
    if decl.anchor.is_none() {
        return Err(GenerateError::MissingCompanionAnchor {
            decl: decl.ty.qualified(),
        });
    }
    let owner = decl.ty.clone();
    // Marking the type reserves its artifact even when no plan lands.
    let _ = artifacts.artifact_for(&owner);

    if marker.cache_no_args {
        let Some(ctor) = decl.no_args_constructor() else {
            debug!(
                "caching requested for `{}` but no zero-parameter constructor exists",
                owner.qualified()
            );
            return Err(GenerateError::MissingNoArgsConstructor {
                decl: owner.qualified(),
            });
        };
        let accessor = resolve_name(&marker.cached_accessor_name, DEFAULT_ACCESSOR, "");
        let artifact = artifacts.artifact_for(&owner);
        artifact.singleton = Some(SingletonField {
            name: SINGLETON_FIELD.to_owned(),
            ty: owner.clone(),
            constructor: ctor.clone(),
        });
        artifact.push_plan(anchor_plan(
            &owner,
            accessor,
            Vec::new(),
            BodyTemplate::ReturnCached,
        ));
    }

    for ctor in &decl.constructors {
        // The cached no-args constructor is served by the accessor.
        if marker.cache_no_args && ctor.is_no_args() {
            continue;
        }
        artifacts.artifact_for(&owner).push_plan(anchor_plan(
            &owner,
            FACTORY_NAME.to_owned(),
            ctor.params.clone(),
            BodyTemplate::ReturnConstructed(ctor.clone()),
        ));
    }

    Ok(())
}

/// Resolve a value's declared type to a declaration that can anchor
/// generated members.
fn resolve_owner(
    host: &dyn SymbolHost,
    value: &ValueDecl,
    require_anchor: bool,
) -> Result<TypeDecl, GenerateError> {
    let unresolvable = || GenerateError::UnresolvableTargetType {
        decl: value.name.qualified(),
        target: value.ty.clone(),
    };
    let owner = host.resolve_type(&value.ty).ok_or_else(unresolvable)?;
    if require_anchor && owner.anchor.is_none() {
        return Err(unresolvable());
    }
    Ok(owner)
}

fn plan_cached_value(
    host: &dyn SymbolHost,
    value: &ValueDecl,
    marker: &CachedValueMarker,
    artifacts: &mut ArtifactSet,
) -> Result<(), GenerateError> {
    let owner = resolve_owner(host, value, true)?.ty;
    let name = resolve_name(&marker.method_name, &value.name.name, DEFAULT_STRIP_SUFFIX);

    let artifact = artifacts.artifact_for(&owner);
    artifact.add_import(value.name.qualified());
    artifact.push_plan(anchor_plan(
        &owner,
        name,
        Vec::new(),
        BodyTemplate::ReturnValueRef(value.name.clone()),
    ));
    Ok(())
}

/// Normalize a marker's type argument to a concrete reference. A
/// forward reference that the host cannot resolve still normalizes
/// when the path itself names a concrete type.
fn normalize_target(
    host: &dyn SymbolHost,
    decl: &QualifiedName,
    target: &TypeTarget,
) -> Result<TypeRef, GenerateError> {
    match target {
        TypeTarget::Resolved(ty) => Ok(ty.clone()),
        TypeTarget::Forward(path) => {
            if let Some(found) = host.resolve_type(path) {
                return Ok(found.ty);
            }
            TypeRef::parse(path).ok_or_else(|| GenerateError::UnresolvableTargetType {
                decl: decl.qualified(),
                target: path.clone(),
            })
        }
    }
}

fn plan_or_throw(
    host: &dyn SymbolHost,
    value: &ValueDecl,
    marker: &UnwrapOrThrowMarker,
    artifacts: &mut ArtifactSet,
) -> Result<(), GenerateError> {
    // The plan lands in the artifact of the raised value's own type;
    // the optional receiver needs no anchor there.
    let owner = resolve_owner(host, value, false)?.ty;
    let target = normalize_target(host, &value.name, &marker.target)?;
    let name = resolve_name(
        &marker.method_name,
        &or_throw_fallback(&value.name.name),
        DEFAULT_STRIP_SUFFIX,
    );

    let artifact = artifacts.artifact_for(&owner);
    artifact.add_import(value.name.qualified());
    if !target.namespace.is_empty() {
        artifact.add_import(target.qualified());
    }
    artifact.push_plan(EmissionPlan {
        name,
        receiver: Receiver::OptionalOf(target.clone()),
        params: Vec::new(),
        returns: target,
        body: BodyTemplate::ReturnOrThrow {
            raise: value.name.clone(),
        },
    });
    Ok(())
}
