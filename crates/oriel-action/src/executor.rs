//! Method execution for the action lifecycle.

use std::sync::Arc;

use tracing::debug;

use oriel_core::{
    DispatchResult, InstanceResolver, MappingMatch, ParameterResolver, invoke_match,
};

use crate::context::ActionContext;
use crate::resolver::ActionParameterResolver;

/// Executes a matched action method and establishes the resulting view.
///
/// The method's return value is a view id. If no view has been established
/// for the request yet, the view engine is asked to create one for that id;
/// an already-established view is left untouched.
pub struct ActionMethodExecutor {
    resolver: Arc<dyn ParameterResolver>,
    instances: Arc<dyn InstanceResolver>,
}

impl ActionMethodExecutor {
    /// Creates an executor with the default action parameter resolver.
    pub fn new(instances: Arc<dyn InstanceResolver>) -> Self {
        Self {
            resolver: Arc::new(ActionParameterResolver::new(Arc::clone(&instances))),
            instances,
        }
    }

    /// Replaces the parameter resolver.
    pub fn with_resolver(mut self, resolver: Arc<dyn ParameterResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Resolves parameters, invokes the matched method, and sets up view
    /// state from the returned view id.
    pub fn execute(
        &self,
        ctx: &ActionContext,
        selected: &MappingMatch<String>,
    ) -> DispatchResult<()> {
        let view_id = invoke_match(
            ctx.request(),
            selected,
            self.resolver.as_ref(),
            self.instances.as_ref(),
        )?;

        if ctx.views().current_view().is_none() {
            debug!(view_id = %view_id, "establishing view for request");
            let view = ctx.views().create_view(&view_id);
            ctx.views().set_current_view(view);
        }
        Ok(())
    }
}
