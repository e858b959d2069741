//! The REST lifecycle: match, invoke, serialize, write.
//!
//! Unlike the action lifecycle there is no separate render phase: the
//! handler's payload is serialized and written directly, and the response is
//! marked complete, short-circuiting any further processing by the host.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{Level, debug, span};

use oriel_core::{
    DispatchContext, DispatchError, DispatchResult, HandlerRegistry, InstanceResolver,
    MappingMatcher, RequestContext,
};

use crate::executor::{RestMethodExecutor, RestPayload};
use crate::writer::{JSON_CONTENT_TYPE, WriterRegistry};

/// Tunables for the REST lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RestConfig {
    /// Content type used when the request names none, a wildcard, or a type
    /// no writer is registered for.
    pub default_content_type: String,
    /// Status sent when the handler produced no content.
    pub no_content_status: u16,
    /// Message sent with the no-content status.
    pub no_content_message: String,
    /// Status sent when no mapping matches the request path.
    pub not_found_status: u16,
    /// Message sent with the not-found status.
    pub not_found_message: String,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            default_content_type: JSON_CONTENT_TYPE.to_string(),
            no_content_status: 204,
            no_content_message: "no content".to_string(),
            not_found_status: 404,
            not_found_message: "unable to match request path".to_string(),
        }
    }
}

/// The REST dispatch pipeline.
pub struct RestLifecycle {
    matcher: MappingMatcher<RestPayload>,
    executor: RestMethodExecutor,
    writers: WriterRegistry,
    config: RestConfig,
}

impl RestLifecycle {
    /// Wires a lifecycle from its collaborator ports, with the default
    /// writer set (JSON) and default configuration.
    pub fn new(
        registry: Arc<dyn HandlerRegistry<RestPayload>>,
        instances: Arc<dyn InstanceResolver>,
    ) -> Self {
        Self {
            matcher: MappingMatcher::new(registry),
            executor: RestMethodExecutor::new(instances),
            writers: WriterRegistry::with_defaults(),
            config: RestConfig::default(),
        }
    }

    /// Replaces the writer registry.
    pub fn with_writers(mut self, writers: WriterRegistry) -> Self {
        self.writers = writers;
        self
    }

    /// Replaces the lifecycle configuration.
    pub fn with_config(mut self, config: RestConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the method executor.
    pub fn with_executor(mut self, executor: RestMethodExecutor) -> Self {
        self.executor = executor;
        self
    }

    /// Dispatches one request end to end.
    pub fn dispatch(&self, ctx: &DispatchContext) -> DispatchResult<()> {
        let span = span!(Level::DEBUG, "rest_dispatch",
            path = ctx.request().path_info().unwrap_or_default());
        let _enter = span.enter();

        match self.matcher.match_request(ctx.request()) {
            Some(selected) => {
                let payload = self.executor.execute(ctx, &selected)?;
                self.respond(ctx, payload)
            }
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

    /// Serializes and writes a payload, or answers no-content, and marks the
    /// response complete either way.
    pub fn respond(&self, ctx: &DispatchContext, payload: RestPayload) -> DispatchResult<()> {
        match payload {
            None => {
                ctx.response()
                    .send_error(self.config.no_content_status, &self.config.no_content_message)
                    .map_err(DispatchError::Write)?;
                ctx.response().mark_complete();
                Ok(())
            }
            Some(value) => {
                let content_type = self.negotiate(ctx.request());
                let writer = self.writers.writer_for(&content_type).ok_or(
                    DispatchError::UnknownContentType { content_type },
                )?;
                let body = writer.serialize(&value)?;
                ctx.response().write_body(&body).map_err(DispatchError::Write)?;
                ctx.response().mark_complete();
                Ok(())
            }
        }
    }

    /// Picks the response content type from the `Accept` header.
    ///
    /// Only exact matches against registered writers count; anything else —
    /// no header, a wildcard, an unregistered type — falls back to the
    /// configured default.
    fn negotiate(&self, request: &dyn RequestContext) -> String {
        match request.header_value("Accept") {
            Some(accept) if accept != "*/*" && self.writers.writer_for(accept).is_some() => {
                accept.to_string()
            }
            _ => self.config.default_content_type.clone(),
        }
    }
}
