//! Method execution for the REST lifecycle.

use std::sync::Arc;

use serde_json::Value;

use oriel_core::{
    DispatchContext, DispatchResult, InstanceResolver, MappingMatch, ParameterResolver,
    invoke_match,
};

use crate::resolver::RestParameterResolver;

/// The raw result of a REST handler method.
///
/// `None` means the method produced no content; the responder answers it
/// with the configured no-content status instead of a body.
pub type RestPayload = Option<Value>;

/// Executes a matched REST method and returns its payload untouched.
///
/// Interpretation of the payload — serialization and writing — is the
/// responder's concern, not the executor's.
pub struct RestMethodExecutor {
    resolver: Arc<dyn ParameterResolver>,
    instances: Arc<dyn InstanceResolver>,
}

impl RestMethodExecutor {
    /// Creates an executor with the default REST parameter resolver.
    pub fn new(instances: Arc<dyn InstanceResolver>) -> Self {
        Self {
            resolver: Arc::new(RestParameterResolver::new(Arc::clone(&instances))),
            instances,
        }
    }

    /// Replaces the parameter resolver.
    pub fn with_resolver(mut self, resolver: Arc<dyn ParameterResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Resolves parameters and invokes the matched method.
    pub fn execute(
        &self,
        ctx: &DispatchContext,
        selected: &MappingMatch<RestPayload>,
    ) -> DispatchResult<RestPayload> {
        invoke_match(
            ctx.request(),
            selected,
            self.resolver.as_ref(),
            self.instances.as_ref(),
        )
    }
}
