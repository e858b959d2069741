//! The shared invoke pipeline.
//!
//! Both lifecycle variants execute a matched method the same way: resolve
//! one instance of the handler's declared type, build a parameter vector of
//! exactly the method's declared length by calling the parameter resolver
//! once per slot in declaration order, then invoke the method's closure on
//! the instance. Only the resolver variant and the interpretation of the
//! return value differ between pipelines.

use tracing::trace;

use crate::binding::{Args, BoundValue, ParameterResolver};
use crate::context::RequestContext;
use crate::error::{DispatchError, DispatchResult};
use crate::inject::InstanceResolver;
use crate::matcher::MappingMatch;

/// Invokes the matched handler method and returns its raw result.
///
/// Any failure — an unresolvable handler instance, a parameter binding
/// error, or a failure raised by the method itself — is fatal to the current
/// request and surfaces as a [`DispatchError`]. Nothing is retried.
pub fn invoke_match<R: 'static>(
    request: &dyn RequestContext,
    selected: &MappingMatch<R>,
    resolver: &dyn ParameterResolver,
    instances: &dyn InstanceResolver,
) -> DispatchResult<R> {
    let instance = instances
        .resolve(selected.handler_type_id())
        .ok_or_else(|| DispatchError::unresolved(selected.handler_type_name()))?;

    let method = selected.method();
    let mut values: Vec<BoundValue> = Vec::with_capacity(method.params().len());
    for spec in method.params() {
        values.push(resolver.resolve(request, selected.mapping(), selected.path(), spec)?);
    }

    trace!(
        handler = selected.handler_type_name(),
        method = method.name(),
        params = values.len(),
        "invoking handler method"
    );
    method
        .invoke(&instance, Args::new(&values))
        .map_err(|source| DispatchError::invocation(method.name(), source))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::binding::ParameterSpec;
    use crate::context::RequestContext;
    use crate::inject::StaticInstances;
    use crate::matcher::MappingMatcher;
    use crate::registry::{HandlerDescriptor, StaticHandlerRegistry};

    struct StubRequest;

    impl RequestContext for StubRequest {
        fn path_info(&self) -> Option<&str> {
            Some("/things/7")
        }

        fn header_value(&self, name: &str) -> Option<&str> {
            (name == "X-Trace").then_some("trace-1")
        }

        fn header_values(&self, _name: &str) -> Vec<String> {
            Vec::new()
        }

        fn query_param(&self, name: &str) -> Option<&str> {
            (name == "verbose").then_some("true")
        }
    }

    /// Resolver that answers every slot with the header name's value shape,
    /// enough to observe ordering and count.
    struct SlotResolver;

    impl ParameterResolver for SlotResolver {
        fn resolve(
            &self,
            request: &dyn RequestContext,
            _mapping: &str,
            _path: &str,
            spec: &ParameterSpec,
        ) -> DispatchResult<BoundValue> {
            use crate::binding::ParameterBinding;
            Ok(match spec.binding() {
                ParameterBinding::Header(name) => {
                    BoundValue::Text(request.header_value(name).map(str::to_string))
                }
                ParameterBinding::Query(name) => {
                    BoundValue::Text(request.query_param(name).map(str::to_string))
                }
                _ => BoundValue::Text(None),
            })
        }
    }

    struct Things;

    fn matched(registry: StaticHandlerRegistry<String>) -> MappingMatch<String> {
        MappingMatcher::new(Arc::new(registry))
            .match_request(&StubRequest)
            .expect("route matches")
    }

    #[test]
    fn test_parameter_vector_built_in_declaration_order() {
        let descriptor = HandlerDescriptor::of::<Things>()
            .route(
                "show",
                "/things/*",
                vec![ParameterSpec::header("X-Trace"), ParameterSpec::query("verbose")],
                |_: &Things, args| {
                    Ok(format!(
                        "{}/{}",
                        args.required_text(0)?,
                        args.required_text(1)?
                    ))
                },
            )
            .build();
        let selected = matched(StaticHandlerRegistry::new().with(descriptor));
        let instances = StaticInstances::new().with(Things);

        let result = invoke_match(&StubRequest, &selected, &SlotResolver, &instances).unwrap();
        assert_eq!(result, "trace-1/true");
    }

    #[test]
    fn test_zero_parameter_method_gets_empty_vector() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let descriptor = HandlerDescriptor::of::<Things>()
            .route("list", "/things/*", Vec::new(), move |_: &Things, args| {
                assert!(args.is_empty());
                seen.fetch_add(1, Ordering::SeqCst);
                Ok("listed".to_string())
            })
            .build();
        let selected = matched(StaticHandlerRegistry::new().with(descriptor));
        let instances = StaticInstances::new().with(Things);

        invoke_match(&StubRequest, &selected, &SlotResolver, &instances).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unresolvable_handler_instance_is_fatal() {
        let descriptor = HandlerDescriptor::of::<Things>()
            .route("list", "/things/*", Vec::new(), |_: &Things, _| {
                Ok("listed".to_string())
            })
            .build();
        let selected = matched(StaticHandlerRegistry::new().with(descriptor));
        let instances = StaticInstances::new();

        let err = invoke_match(&StubRequest, &selected, &SlotResolver, &instances).unwrap_err();
        assert!(matches!(err, DispatchError::UnresolvedInstance { .. }));
    }

    #[test]
    fn test_handler_failure_wraps_with_method_name() {
        let descriptor = HandlerDescriptor::of::<Things>()
            .route("broken", "/things/*", Vec::new(), |_: &Things, _| {
                Err::<String, _>("storage offline".into())
            })
            .build();
        let selected = matched(StaticHandlerRegistry::new().with(descriptor));
        let instances = StaticInstances::new().with(Things);

        let err = invoke_match(&StubRequest, &selected, &SlotResolver, &instances).unwrap_err();
        match err {
            DispatchError::Invocation { method, source } => {
                assert_eq!(method, "broken");
                assert_eq!(source.to_string(), "storage offline");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
