//! Parameter resolution for REST methods.

use std::sync::Arc;

use oriel_core::binding::{capture_value, injected_value};
use oriel_core::{
    BoundValue, DispatchResult, InstanceResolver, ParameterBinding, ParameterResolver,
    ParameterSpec, RequestContext,
};

/// The REST-variant [`ParameterResolver`].
///
/// Differs from the action variant in one place: a header slot binds the
/// full ordered sequence of values for the header name, empty when the
/// header is absent. Captures, query parameters, and injected instances
/// follow the shared strategy.
pub struct RestParameterResolver {
    instances: Arc<dyn InstanceResolver>,
}

impl RestParameterResolver {
    /// Creates a resolver backed by the given instance-resolution port.
    pub fn new(instances: Arc<dyn InstanceResolver>) -> Self {
        Self { instances }
    }
}

impl ParameterResolver for RestParameterResolver {
    fn resolve(
        &self,
        request: &dyn RequestContext,
        mapping: &str,
        path: &str,
        spec: &ParameterSpec,
    ) -> DispatchResult<BoundValue> {
        match spec.binding() {
            ParameterBinding::Header(name) => {
                Ok(BoundValue::TextList(request.header_values(name)))
            }
            ParameterBinding::PathCapture(group) => {
                capture_value(mapping, path, group).map(BoundValue::Text)
            }
            ParameterBinding::Query(name) => Ok(BoundValue::Text(
                request.query_param(name).map(str::to_string),
            )),
            ParameterBinding::Injected { type_id, type_name } => {
                injected_value(self.instances.as_ref(), *type_id, type_name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oriel_core::StaticInstances;

    struct StubRequest;

    impl RequestContext for StubRequest {
        fn path_info(&self) -> Option<&str> {
            Some("/api/items/9")
        }

        fn header_value(&self, name: &str) -> Option<&str> {
            (name == "X-Tag").then_some("alpha")
        }

        fn header_values(&self, name: &str) -> Vec<String> {
            if name == "X-Tag" {
                vec!["alpha".to_string(), "beta".to_string()]
            } else {
                Vec::new()
            }
        }

        fn query_param(&self, name: &str) -> Option<&str> {
            (name == "page").then_some("3")
        }
    }

    fn resolver() -> RestParameterResolver {
        RestParameterResolver::new(Arc::new(StaticInstances::new()))
    }

    #[test]
    fn test_header_binds_all_values_in_send_order() {
        let value = resolver()
            .resolve(&StubRequest, "/api/", "/api/items/9", &ParameterSpec::header("X-Tag"))
            .unwrap();
        match value {
            BoundValue::TextList(values) => assert_eq!(values, ["alpha", "beta"]),
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn test_absent_header_binds_empty_sequence() {
        let value = resolver()
            .resolve(&StubRequest, "/api/", "/api/items/9", &ParameterSpec::header("X-None"))
            .unwrap();
        match value {
            BoundValue::TextList(values) => assert!(values.is_empty()),
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn test_path_capture_and_query_follow_shared_strategy() {
        let capture = resolver()
            .resolve(
                &StubRequest,
                "/api/items/(?<nr>[0-9]+)",
                "/api/items/9",
                &ParameterSpec::path_capture("nr"),
            )
            .unwrap();
        assert!(matches!(capture, BoundValue::Text(Some(ref v)) if v == "9"));

        let query = resolver()
            .resolve(&StubRequest, "/api/", "/api/items/9", &ParameterSpec::query("page"))
            .unwrap();
        assert!(matches!(query, BoundValue::Text(Some(ref v)) if v == "3"));
    }
}
