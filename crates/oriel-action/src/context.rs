//! The per-request context for the action lifecycle.
//!
//! [`ActionContext`] composes the core's request/response pair with the
//! per-request view state the action pipeline additionally needs. One is
//! created per request and discarded after dispatch.

use std::sync::Arc;

use oriel_core::{DispatchContext, RequestContext, ResponseSink};

use crate::view::ViewContext;

/// Full context handed through the action pipeline.
pub struct ActionContext {
    base: DispatchContext,
    views: Arc<dyn ViewContext>,
}

impl ActionContext {
    /// Creates an action context from the core context and the view port.
    pub fn new(base: DispatchContext, views: Arc<dyn ViewContext>) -> Self {
        Self { base, views }
    }

    /// The core request/response pair.
    pub fn base(&self) -> &DispatchContext {
        &self.base
    }

    /// The request port.
    pub fn request(&self) -> &dyn RequestContext {
        self.base.request()
    }

    /// The response port.
    pub fn response(&self) -> &dyn ResponseSink {
        self.base.response()
    }

    /// The per-request view state.
    pub fn views(&self) -> &dyn ViewContext {
        self.views.as_ref()
    }
}

impl std::fmt::Debug for ActionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionContext")
            .field("base", &self.base)
            .field("current_view", &self.views.current_view())
            .finish_non_exhaustive()
    }
}
