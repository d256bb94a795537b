//! Output aggregation: one artifact per owning type.
//!
//! Emitting one output per marker instance is the historical bug this
//! module exists to prevent: two markers landing on the same owning
//! type must accumulate into the same artifact instead of racing to
//! create competing files with duplicate symbols.

use std::collections::BTreeSet;

use crate::decl::{Constructor, TypeRef};
use crate::plan::EmissionPlan;

/// Artifact identity: `(namespace, "generated_" + simple name)` of the
/// owning type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactKey {
    pub namespace: String,
    pub name: String,
}

impl ArtifactKey {
    pub fn for_owner(owner: &TypeRef) -> Self {
        ArtifactKey {
            namespace: owner.namespace.clone(),
            name: format!("generated_{}", owner.name),
        }
    }
}

/// The artifact-level singleton field backing a cached accessor.
/// Initialized once on first use, never mutated, never torn down
/// within a run of the generated program.
#[derive(Debug, Clone, PartialEq)]
pub struct SingletonField {
    pub name: String,
    pub ty: TypeRef,
    pub constructor: Constructor,
}

/// One output unit. The plan list is append-only and keeps insertion
/// order; imports deduplicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub key: ArtifactKey,
    pub owner: TypeRef,
    pub singleton: Option<SingletonField>,
    pub plans: Vec<EmissionPlan>,
    pub imports: BTreeSet<String>,
}

impl Artifact {
    fn new(owner: &TypeRef) -> Self {
        Artifact {
            key: ArtifactKey::for_owner(owner),
            owner: owner.clone(),
            singleton: None,
            plans: Vec::new(),
            imports: BTreeSet::new(),
        }
    }

    pub fn push_plan(&mut self, plan: EmissionPlan) {
        self.plans.push(plan);
    }

    pub fn add_import(&mut self, path: impl Into<String>) {
        self.imports.insert(path.into());
    }
}

/// The per-run artifact map, rebuilt from scratch every run and
/// discarded afterwards.
#[derive(Debug, Default)]
pub struct ArtifactSet {
    artifacts: Vec<Artifact>,
}

impl ArtifactSet {
    /// Find the artifact for an owning type, creating it on first
    /// touch. A key is never created twice and never overwritten;
    /// every marker targeting the same owner gets the same artifact.
    pub fn artifact_for(&mut self, owner: &TypeRef) -> &mut Artifact {
        let key = ArtifactKey::for_owner(owner);
        let pos = match self.artifacts.iter().position(|a| a.key == key) {
            Some(pos) => pos,
            None => {
                self.artifacts.push(Artifact::new(owner));
                self.artifacts.len() - 1
            }
        };
        &mut self.artifacts[pos]
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Finalized artifacts in first-touch order.
    pub fn into_artifacts(self) -> Vec<Artifact> {
        self.artifacts
    }
}
