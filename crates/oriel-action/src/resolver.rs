//! Parameter resolution for action methods.

use std::sync::Arc;

use oriel_core::binding::{capture_value, injected_value};
use oriel_core::{
    BoundValue, DispatchResult, InstanceResolver, ParameterBinding, ParameterResolver,
    ParameterSpec, RequestContext,
};

/// The action-variant [`ParameterResolver`].
///
/// Header slots bind the header's single value; everything else follows the
/// shared strategy: path captures re-apply the effective mapping, query
/// slots read the query map, untagged slots resolve an instance of the
/// declared type.
pub struct ActionParameterResolver {
    instances: Arc<dyn InstanceResolver>,
}

impl ActionParameterResolver {
    /// Creates a resolver backed by the given instance-resolution port.
    pub fn new(instances: Arc<dyn InstanceResolver>) -> Self {
        Self { instances }
    }
}

impl ParameterResolver for ActionParameterResolver {
    fn resolve(
        &self,
        request: &dyn RequestContext,
        mapping: &str,
        path: &str,
        spec: &ParameterSpec,
    ) -> DispatchResult<BoundValue> {
        match spec.binding() {
            ParameterBinding::Header(name) => Ok(BoundValue::Text(
                request.header_value(name).map(str::to_string),
            )),
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
