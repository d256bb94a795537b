//! Generated-member naming rules.
//!
//! Engine-level names keep the marker's own convention (an explicit
//! name is returned verbatim); converting them to the target
//! language's casing is the renderer's job.

/// Suffix stripped from derived names, compared case-insensitively.
pub const DEFAULT_STRIP_SUFFIX: &str = "exception";

/// Resolve a generated member name.
///
/// An explicit (non-blank) name always wins and is returned verbatim.
/// Otherwise the fallback is used, with `strip_suffix` removed from
/// its end when it matches case-insensitively.
pub fn resolve_name(explicit: &str, fallback: &str, strip_suffix: &str) -> String {
    if !explicit.trim().is_empty() {
        return explicit.to_owned();
    }
    let mut name = fallback.to_owned();
    if !strip_suffix.is_empty()
        && name.to_lowercase().ends_with(&strip_suffix.to_lowercase())
        && name.len() > strip_suffix.len()
    {
        name.truncate(name.len() - strip_suffix.len());
    }
    name
}

/// Fallback name for unwrap-or-raise accessors: the value's simple
/// name with its first character capitalized, behind an `orThrow`
/// prefix (`userNotFound` -> `orThrowUserNotFound`).
pub fn or_throw_fallback(value_name: &str) -> String {
    let mut chars = value_name.chars();
    match chars.next() {
        None => "orThrow".to_owned(),
        Some(first) => format!("orThrow{}{}", first.to_uppercase(), chars.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_name_wins() {
        assert_eq!(resolve_name("custom", "anything", "exception"), "custom");
        assert_eq!(
            resolve_name("custom", "anythingException", "exception"),
            "custom"
        );
    }

    #[test]
    fn fallback_strips_suffix() {
        assert_eq!(
            resolve_name("", "userNotFoundException", "exception"),
            "userNotFound"
        );
        assert_eq!(
            resolve_name("", "userNotFoundEXCEPTION", "exception"),
            "userNotFound"
        );
        assert_eq!(resolve_name("  ", "plainName", "exception"), "plainName");
    }

    #[test]
    fn suffix_only_names_are_kept() {
        // Stripping must not produce an empty name.
        assert_eq!(resolve_name("", "Exception", "exception"), "Exception");
    }

    #[test]
    fn or_throw_prefixes_and_capitalizes() {
        assert_eq!(or_throw_fallback("userNotFound"), "orThrowUserNotFound");
        assert_eq!(
            resolve_name("", &or_throw_fallback("userNotFoundException"), "exception"),
            "orThrowUserNotFound"
        );
    }
}
