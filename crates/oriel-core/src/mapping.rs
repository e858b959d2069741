//! Mapping pattern classification.
//!
//! A mapping declaration is a plain pattern string attached to a handler
//! method. Its kind is determined structurally, checked against the request
//! path in a fixed priority order:
//!
//! 1. [`MappingKind::Exact`] — the pattern equals the path.
//! 2. [`MappingKind::Prefix`] — the pattern ends with `*`.
//! 3. [`MappingKind::Extension`] — the pattern starts with `*`.
//! 4. [`MappingKind::Regex`] — the pattern starts with `regex:`.
//!
//! A pattern matching none of these rules yields no kind and the declaration
//! is skipped during matching. Note that classification depends on the path:
//! `/items*` is an exact mapping for the literal path `/items*` and a prefix
//! mapping for everything else.

use regex::Regex;

/// Reserved prefix introducing a regular-expression mapping.
pub const REGEX_MAPPING_PREFIX: &str = "regex:";

/// The kind of a mapping declaration, relative to one request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingKind {
    /// The pattern equals the path exactly.
    Exact,
    /// The pattern ends with `*`; matches paths starting with the rest.
    Prefix,
    /// The pattern starts with `*`; matches paths ending with the rest.
    Extension,
    /// The pattern carries the `regex:` prefix; the remainder is a regular
    /// expression tested against the full path.
    Regex,
}

/// Classifies a declared pattern against a request path.
///
/// Returns `None` for patterns that fit no mapping kind.
pub fn classify(pattern: &str, path: &str) -> Option<MappingKind> {
    if pattern == path {
        Some(MappingKind::Exact)
    } else if pattern.ends_with('*') {
        Some(MappingKind::Prefix)
    } else if pattern.starts_with('*') {
        Some(MappingKind::Extension)
    } else if pattern.starts_with(REGEX_MAPPING_PREFIX) {
        Some(MappingKind::Regex)
    } else {
        None
    }
}

/// Compiles a mapping string as a whole-path regular expression.
///
/// Mapping regexes must cover the full path, not a substring of it, so the
/// pattern is wrapped in anchors before compilation.
pub fn compile_anchored(mapping: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{mapping})$"))
}
