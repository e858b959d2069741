//! Mapping match resolution across all registered handlers.
//!
//! # Algorithm
//!
//! For each handler in discovery order, every mapped method is classified
//! against the request path and folded into that handler's local best match:
//!
//! - An exact match records immediately.
//! - A prefix match (trailing `*` stripped) is kept only when the handler
//!   holds no match yet or the new prefix is strictly longer than the held
//!   mapping.
//! - An extension match (leading `*` stripped) always overwrites the held
//!   match — the last extension match wins for that handler, not the longest.
//! - A regex match (whole-path, `regex:` stripped) overwrites the held match.
//!
//! The first exact or extension match latches the handler's scan: these
//! kinds are maximally specific for one handler and its remaining methods
//! are not examined. The latch is part of the observable selection contract
//! when duplicate patterns exist, not an optimization.
//!
//! Across handlers, a candidate replaces the running winner only when its
//! effective mapping is strictly longer. Lengths are compared on the
//! *stripped* mapping string, so an extension winner (a short suffix) can
//! lose to a longer prefix mapping from a different handler, and two
//! equal-length candidates resolve by discovery order. This precedence is
//! pinned by tests; keep it intact.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::context::RequestContext;
use crate::mapping::{MappingKind, REGEX_MAPPING_PREFIX, classify, compile_anchored};
use crate::registry::{HandlerDescriptor, HandlerMethod, HandlerRegistry};

/// The immutable result of mapping selection for one request.
///
/// Carries the handler identity, the selected method, the *effective*
/// mapping string (wildcard or `regex:` prefix stripped), the mapping kind,
/// and the path it was selected for. Created fresh per request and discarded
/// after dispatch; nothing here is cached or mutated.
pub struct MappingMatch<R: 'static> {
    handler_type_id: std::any::TypeId,
    handler_type_name: &'static str,
    method: Arc<HandlerMethod<R>>,
    mapping: String,
    kind: MappingKind,
    path: String,
}

impl<R: 'static> MappingMatch<R> {
    fn new(
        descriptor: &HandlerDescriptor<R>,
        method: &Arc<HandlerMethod<R>>,
        mapping: impl Into<String>,
        kind: MappingKind,
        path: &str,
    ) -> Self {
        Self {
            handler_type_id: descriptor.type_id(),
            handler_type_name: descriptor.type_name(),
            method: Arc::clone(method),
            mapping: mapping.into(),
            kind,
            path: path.to_string(),
        }
    }

    /// The declared type of the handler the method belongs to.
    pub fn handler_type_id(&self) -> std::any::TypeId {
        self.handler_type_id
    }

    /// The handler's type name, for diagnostics.
    pub fn handler_type_name(&self) -> &'static str {
        self.handler_type_name
    }

    /// The selected method.
    pub fn method(&self) -> &HandlerMethod<R> {
        &self.method
    }

    /// The effective mapping string.
    pub fn mapping(&self) -> &str {
        &self.mapping
    }

    /// The mapping kind the selection was made under.
    pub fn kind(&self) -> MappingKind {
        self.kind
    }

    /// The request path the match was selected for.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Length of the effective mapping string — the tie-break key between
    /// candidates from different handlers.
    pub fn length(&self) -> usize {
        self.mapping.len()
    }
}

impl<R: 'static> std::fmt::Debug for MappingMatch<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappingMatch")
            .field("handler", &self.handler_type_name)
            .field("method", &self.method.name())
            .field("mapping", &self.mapping)
            .field("kind", &self.kind)
            .field("path", &self.path)
            .finish()
    }
}

/// Resolves the best mapping match for a request across every handler the
/// registry discovers.
pub struct MappingMatcher<R: 'static> {
    registry: Arc<dyn HandlerRegistry<R>>,
}

impl<R: 'static> MappingMatcher<R> {
    /// Creates a matcher over the given handler registry.
    pub fn new(registry: Arc<dyn HandlerRegistry<R>>) -> Self {
        Self { registry }
    }

    /// Matches the request path to a handler method.
    ///
    /// Returns `None` when the request carries no path info or no mapping
    /// applies; the caller is expected to answer that with a 404-class
    /// response without invoking any handler.
    pub fn match_request(&self, request: &dyn RequestContext) -> Option<MappingMatch<R>> {
        let path = request.path_info()?;

        let mut winner: Option<MappingMatch<R>> = None;
        for descriptor in self.registry.handlers() {
            let candidate = scan_handler(&descriptor, path);
            winner = match (winner, candidate) {
                (None, candidate) => candidate,
                (Some(held), Some(candidate)) if candidate.length() > held.length() => {
                    Some(candidate)
                }
                (held, _) => held,
            };
        }

        match &winner {
            Some(found) => debug!(
                path,
                handler = found.handler_type_name(),
                method = found.method().name(),
                mapping = found.mapping(),
                kind = ?found.kind(),
                "resolved mapping match"
            ),
            None => debug!(path, "no mapping matched"),
        }
        winner
    }
}

impl<R: 'static> std::fmt::Debug for MappingMatcher<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappingMatcher")
            .field("handlers", &self.registry.handlers().len())
            .finish()
    }
}

/// Folds one handler's methods into its local best match.
fn scan_handler<R: 'static>(
    descriptor: &HandlerDescriptor<R>,
    path: &str,
) -> Option<MappingMatch<R>> {
    let mut held: Option<MappingMatch<R>> = None;
    for method in descriptor.methods() {
        held = apply_method(descriptor, method, path, held);
        // Exact and extension matches latch the scan for this handler.
        if matches!(
            held.as_ref().map(MappingMatch::kind),
            Some(MappingKind::Exact | MappingKind::Extension)
        ) {
            break;
        }
    }
    held
}

/// Applies one mapping declaration to the handler's held match.
fn apply_method<R: 'static>(
    descriptor: &HandlerDescriptor<R>,
    method: &Arc<HandlerMethod<R>>,
    path: &str,
    held: Option<MappingMatch<R>>,
) -> Option<MappingMatch<R>> {
    let pattern = method.mapping();
    let Some(kind) = classify(pattern, path) else {
        // Unclassifiable declarations are skipped.
        return held;
    };
    trace!(method = method.name(), pattern, ?kind, "examining mapping declaration");

    match kind {
        MappingKind::Exact => Some(MappingMatch::new(
            descriptor,
            method,
            pattern,
            MappingKind::Exact,
            path,
        )),
        MappingKind::Prefix => {
            let stripped = &pattern[..pattern.len() - 1];
            if !path.starts_with(stripped) {
                return held;
            }
            match held {
                Some(prior) if stripped.len() <= prior.length() => Some(prior),
                _ => Some(MappingMatch::new(
                    descriptor,
                    method,
                    stripped,
                    MappingKind::Prefix,
                    path,
                )),
            }
        }
        MappingKind::Extension => {
            let stripped = &pattern[1..];
            if path.ends_with(stripped) {
                Some(MappingMatch::new(
                    descriptor,
                    method,
                    stripped,
                    MappingKind::Extension,
                    path,
                ))
            } else {
                held
            }
        }
        MappingKind::Regex => {
            let stripped = &pattern[REGEX_MAPPING_PREFIX.len()..];
            match compile_anchored(stripped) {
                Ok(expression) if expression.is_match(path) => Some(MappingMatch::new(
                    descriptor,
                    method,
                    stripped,
                    MappingKind::Regex,
                    path,
                )),
                Ok(_) => held,
                Err(error) => {
                    warn!(method = method.name(), pattern = stripped, %error,
                        "skipping unparsable regex mapping");
                    held
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StaticHandlerRegistry;

    struct StubRequest {
        path: Option<&'static str>,
    }

    impl RequestContext for StubRequest {
        fn path_info(&self) -> Option<&str> {
            self.path
        }

        fn header_value(&self, _name: &str) -> Option<&str> {
            None
        }

        fn header_values(&self, _name: &str) -> Vec<String> {
            Vec::new()
        }

        fn query_param(&self, _name: &str) -> Option<&str> {
            None
        }
    }

    fn request(path: &'static str) -> StubRequest {
        StubRequest { path: Some(path) }
    }

    struct Pages;
    struct Reports;

    /// Builds a single-handler matcher whose methods are (name, mapping)
    /// pairs returning their own name as the result.
    fn matcher_for(routes: &[(&'static str, &'static str)]) -> MappingMatcher<String> {
        let mut builder = HandlerDescriptor::of::<Pages>();
        for (name, mapping) in routes {
            let name = *name;
            builder = builder.route(name, *mapping, Vec::new(), move |_: &Pages, _| {
                Ok(name.to_string())
            });
        }
        MappingMatcher::new(Arc::new(StaticHandlerRegistry::new().with(builder.build())))
    }

    #[test]
    fn test_exact_pattern_selects_method() {
        let matcher = matcher_for(&[("index", "/index"), ("other", "/other")]);
        let found = matcher.match_request(&request("/index")).unwrap();
        assert_eq!(found.kind(), MappingKind::Exact);
        assert_eq!(found.method().name(), "index");
        assert_eq!(found.mapping(), "/index");
        assert_eq!(found.path(), "/index");
    }

    #[test]
    fn test_longest_prefix_wins_within_handler() {
        let matcher = matcher_for(&[("short", "/foo/*"), ("long", "/foobar/*")]);
        let found = matcher.match_request(&request("/foobar/x")).unwrap();
        assert_eq!(found.kind(), MappingKind::Prefix);
        assert_eq!(found.method().name(), "long");
        assert_eq!(found.mapping(), "/foobar/");
        // Declaration order must not matter for prefix selection.
        let matcher = matcher_for(&[("long", "/foobar/*"), ("short", "/foo/*")]);
        let found = matcher.match_request(&request("/foobar/x")).unwrap();
        assert_eq!(found.method().name(), "long");
    }

    #[test]
    fn test_extension_matches_suffix_only() {
        let matcher = matcher_for(&[("json", "*.json")]);
        let found = matcher.match_request(&request("/a/b/report.json")).unwrap();
        assert_eq!(found.kind(), MappingKind::Extension);
        assert_eq!(found.mapping(), ".json");
        assert!(matcher.match_request(&request("/a/b/report.xml")).is_none());
    }

    #[test]
    fn test_last_extension_wins_within_handler() {
        // Both suffixes match; the later declaration overwrites the earlier,
        // regardless of length.
        let matcher = matcher_for(&[("long", "*.data.json"), ("short", "*.json")]);
        let found = matcher.match_request(&request("/report.data.json")).unwrap();
        assert_eq!(found.method().name(), "long");
        assert_eq!(found.mapping(), ".data.json");

        let matcher = matcher_for(&[("short", "*.json"), ("long", "*.data.json")]);
        let found = matcher.match_request(&request("/report.data.json")).unwrap();
        // The first extension match latches the scan; "long" is never examined.
        assert_eq!(found.method().name(), "short");
    }

    #[test]
    fn test_regex_matches_whole_path() {
        let matcher = matcher_for(&[("user", "regex:/users/(?<id>[0-9]+)")]);
        let found = matcher.match_request(&request("/users/42")).unwrap();
        assert_eq!(found.kind(), MappingKind::Regex);
        assert_eq!(found.mapping(), "/users/(?<id>[0-9]+)");
        assert!(matcher.match_request(&request("/users/42/detail")).is_none());
        assert!(matcher.match_request(&request("/users/abc")).is_none());
    }

    #[test]
    fn test_invalid_regex_is_skipped_and_scan_continues() {
        let matcher = matcher_for(&[("bad", "regex:/users/(unclosed"), ("good", "/users/*")]);
        let found = matcher.match_request(&request("/users/42")).unwrap();
        assert_eq!(found.method().name(), "good");
    }

    #[test]
    fn test_unclassifiable_pattern_is_skipped() {
        let matcher = matcher_for(&[("plain", "/only-this-path"), ("home", "/home")]);
        assert!(matcher.match_request(&request("/elsewhere")).is_none());
    }

    #[test]
    fn test_no_path_info_no_match() {
        let matcher = matcher_for(&[("index", "/index")]);
        assert!(matcher.match_request(&StubRequest { path: None }).is_none());
    }

    #[test]
    fn test_exact_latch_stops_handler_scan() {
        // Without the latch the second exact declaration would overwrite the
        // first; with it, the handler's remaining methods are never examined.
        let matcher = matcher_for(&[("first", "/foo"), ("second", "/foo")]);
        let found = matcher.match_request(&request("/foo")).unwrap();
        assert_eq!(found.method().name(), "first");
        assert_eq!(found.kind(), MappingKind::Exact);
    }

    #[test]
    fn test_longest_candidate_wins_across_handlers() {
        let pages: HandlerDescriptor<String> = HandlerDescriptor::of::<Pages>()
            .route("pages", "/foo/*", Vec::new(), |_: &Pages, _| Ok("pages".into()))
            .build();
        let reports: HandlerDescriptor<String> = HandlerDescriptor::of::<Reports>()
            .route("reports", "/foo/bar/*", Vec::new(), |_: &Reports, _| {
                Ok("reports".into())
            })
            .build();
        let matcher = MappingMatcher::new(Arc::new(
            StaticHandlerRegistry::new().with(pages).with(reports),
        ));

        let found = matcher.match_request(&request("/foo/bar/baz")).unwrap();
        assert_eq!(found.method().name(), "reports");
        assert_eq!(found.length(), "/foo/bar/".len());
    }

    #[test]
    fn test_longer_prefix_beats_extension_from_other_handler() {
        // Lengths compare on the stripped mapping, so a short extension
        // suffix loses to a longer prefix even though extension latched its
        // own handler's scan. Pinned: this precedence is the contract.
        let pages: HandlerDescriptor<String> = HandlerDescriptor::of::<Pages>()
            .route("json", "*.json", Vec::new(), |_: &Pages, _| Ok("json".into()))
            .build();
        let reports: HandlerDescriptor<String> = HandlerDescriptor::of::<Reports>()
            .route("tree", "/api/reports/*", Vec::new(), |_: &Reports, _| {
                Ok("tree".into())
            })
            .build();
        let matcher = MappingMatcher::new(Arc::new(
            StaticHandlerRegistry::new().with(pages).with(reports),
        ));

        let found = matcher.match_request(&request("/api/reports/x.json")).unwrap();
        assert_eq!(found.method().name(), "tree");
        assert_eq!(found.kind(), MappingKind::Prefix);
    }

    #[test]
    fn test_equal_length_candidates_resolve_by_discovery_order() {
        // An exact mapping and a prefix mapping of equal effective length:
        // replacement requires strictly greater length, so the handler
        // discovered first keeps the win. Pinned: registration order is the
        // only tie-break.
        let exact: HandlerDescriptor<String> = HandlerDescriptor::of::<Pages>()
            .route("exact", "/p", Vec::new(), |_: &Pages, _| Ok("exact".into()))
            .build();
        let prefix: HandlerDescriptor<String> = HandlerDescriptor::of::<Reports>()
            .route("prefix", "/p*", Vec::new(), |_: &Reports, _| Ok("prefix".into()))
            .build();
        let matcher = MappingMatcher::new(Arc::new(
            StaticHandlerRegistry::new().with(exact).with(prefix),
        ));
        let found = matcher.match_request(&request("/p")).unwrap();
        assert_eq!(found.method().name(), "exact");

        let reversed: HandlerDescriptor<String> = HandlerDescriptor::of::<Reports>()
            .route("prefix", "/p*", Vec::new(), |_: &Reports, _| Ok("prefix".into()))
            .build();
        let exact: HandlerDescriptor<String> = HandlerDescriptor::of::<Pages>()
            .route("exact", "/p", Vec::new(), |_: &Pages, _| Ok("exact".into()))
            .build();
        let matcher = MappingMatcher::new(Arc::new(
            StaticHandlerRegistry::new().with(reversed).with(exact),
        ));
        let found = matcher.match_request(&request("/p")).unwrap();
        assert_eq!(found.method().name(), "prefix");
    }
}
