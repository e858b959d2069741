//! Response handling for the action lifecycle.

use std::sync::Arc;

use parking_lot::Mutex;

use oriel_core::DispatchResult;

use crate::context::ActionContext;
use crate::view::{RenderPipeline, RenderPipelineFactory};

/// Hands a request over to the default render pipeline.
///
/// The pipeline handle is process-wide state: it is resolved from the
/// factory on first access, under a lock so concurrent first requests
/// cannot race the factory, and treated as read-only afterward. Keep the
/// init-once-under-lock shape — the factory is not re-entrant during
/// container startup.
pub struct ActionResponder {
    factory: Arc<dyn RenderPipelineFactory>,
    pipeline: Mutex<Option<Arc<dyn RenderPipeline>>>,
}

impl ActionResponder {
    /// Creates a responder over the given pipeline factory.
    pub fn new(factory: Arc<dyn RenderPipelineFactory>) -> Self {
        Self {
            factory,
            pipeline: Mutex::new(None),
        }
    }

    /// The default render pipeline, resolved on first access.
    fn default_pipeline(&self) -> Arc<dyn RenderPipeline> {
        let mut slot = self.pipeline.lock();
        Arc::clone(slot.get_or_insert_with(|| self.factory.default_pipeline()))
    }

    /// Renders the response for the request.
    pub fn respond(&self, ctx: &ActionContext) -> DispatchResult<()> {
        self.default_pipeline().render(ctx)
    }
}
