//! The action lifecycle: match, invoke, render.
//!
//! `execute` finds and runs the handler method for the request path, or
//! answers with the configured not-found response when nothing matches.
//! `render` runs afterward and hands the request to the render phase —
//! unless the response was already marked complete (a 404, or a handler
//! that finished the response itself). `dispatch` chains the two the way
//! the hosting container calls them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{Level, debug, span};

use oriel_core::{
    DispatchError, DispatchResult, HandlerRegistry, InstanceResolver, MappingMatcher,
};

use crate::context::ActionContext;
use crate::executor::ActionMethodExecutor;
use crate::responder::ActionResponder;
use crate::view::RenderPipelineFactory;

/// Tunables for the action lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionConfig {
    /// Status sent when no mapping matches the request path.
    pub not_found_status: u16,
    /// Message sent with the not-found status.
    pub not_found_message: String,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            not_found_status: 404,
            not_found_message: "unable to match request path".to_string(),
        }
    }
}

/// The action dispatch pipeline.
pub struct ActionLifecycle {
    matcher: MappingMatcher<String>,
    executor: ActionMethodExecutor,
    responder: ActionResponder,
    config: ActionConfig,
}

impl ActionLifecycle {
    /// Wires a lifecycle from its collaborator ports.
    pub fn new(
        registry: Arc<dyn HandlerRegistry<String>>,
        instances: Arc<dyn InstanceResolver>,
        pipelines: Arc<dyn RenderPipelineFactory>,
    ) -> Self {
        Self {
            matcher: MappingMatcher::new(registry),
            executor: ActionMethodExecutor::new(instances),
            responder: ActionResponder::new(pipelines),
            config: ActionConfig::default(),
        }
    }

    /// Replaces the lifecycle configuration.
    pub fn with_config(mut self, config: ActionConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the method executor.
    pub fn with_executor(mut self, executor: ActionMethodExecutor) -> Self {
        self.executor = executor;
        self
    }

    /// The execute phase: match the request and invoke the handler method,
    /// or complete the response with the configured not-found error.
    pub fn execute(&self, ctx: &ActionContext) -> DispatchResult<()> {
        let span = span!(Level::DEBUG, "action_execute",
            path = ctx.request().path_info().unwrap_or_default());
        let _enter = span.enter();

        match self.matcher.match_request(ctx.request()) {
            Some(selected) => self.executor.execute(ctx, &selected),
            None => {
                debug!(
                    status = self.config.not_found_status,
                    "no mapping matched, completing response"
                );
                ctx.response()
                    .send_error(self.config.not_found_status, &self.config.not_found_message)
                    .map_err(DispatchError::Write)?;
                ctx.response().mark_complete();
                Ok(())
            }
        }
    }

    /// The render phase: delegate to the default render pipeline unless the
    /// response is already complete.
    pub fn render(&self, ctx: &ActionContext) -> DispatchResult<()> {
        if ctx.response().is_complete() {
            return Ok(());
        }
        self.responder.respond(ctx)
    }

    /// Runs both phases in the hosting container's call order.
    pub fn dispatch(&self, ctx: &ActionContext) -> DispatchResult<()> {
        self.execute(ctx)?;
        self.render(ctx)
    }
}
