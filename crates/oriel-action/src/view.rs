//! View collaborator ports.
//!
//! The action lifecycle never renders anything itself. It asks the hosting
//! framework's view engine — behind these ports — to create a view for the
//! id an action method returned, and later to run the render phase of the
//! default processing pipeline.

use std::sync::Arc;

use oriel_core::DispatchResult;

use crate::context::ActionContext;

/// Opaque handle to a created view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewHandle {
    view_id: String,
}

impl ViewHandle {
    /// Creates a handle for the given view id.
    pub fn new(view_id: impl Into<String>) -> Self {
        Self {
            view_id: view_id.into(),
        }
    }

    /// The view id this handle was created with.
    pub fn view_id(&self) -> &str {
        &self.view_id
    }
}

/// Per-request view state owned by the hosting framework.
///
/// Methods take `&self`; implementations use interior mutability, mirroring
/// the response sink.
pub trait ViewContext: Send + Sync {
    /// The view established for this request, if any.
    fn current_view(&self) -> Option<ViewHandle>;

    /// Establishes the view for this request.
    fn set_current_view(&self, view: ViewHandle);

    /// Asks the view engine to create a view for `view_id`.
    fn create_view(&self, view_id: &str) -> ViewHandle;
}

/// The render phase of the hosting framework's processing pipeline.
pub trait RenderPipeline: Send + Sync {
    /// Renders the request's current view.
    fn render(&self, ctx: &ActionContext) -> DispatchResult<()>;
}

/// Source of the default render pipeline.
///
/// Consulted exactly once per process by
/// [`ActionResponder`](crate::responder::ActionResponder); see the lazy
/// initialization notes there.
pub trait RenderPipelineFactory: Send + Sync {
    /// The default render pipeline.
    fn default_pipeline(&self) -> Arc<dyn RenderPipeline>;
}
