use thiserror::Error;

/// Fatal generation failures. Any of these aborts the whole run with
/// zero artifacts; the generator never emits a partially consistent
/// output set. Each variant carries the offending declaration's
/// qualified name for diagnostics.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("`{decl}` has no companion anchor to attach generated members to")]
    MissingCompanionAnchor { decl: String },

    #[error("`{decl}` requests caching but has no zero-parameter constructor")]
    MissingNoArgsConstructor { decl: String },

    #[error("marker on `{decl}` references `{target}`, which does not resolve to a concrete type")]
    UnresolvableTargetType { decl: String, target: String },
}
