//! Request and response collaborator ports, plus the per-request
//! [`DispatchContext`] that bundles them.
//!
//! The dispatch core never talks to a transport directly. The hosting layer
//! adapts whatever container it runs in to these two traits and hands the
//! pair to a lifecycle as a `DispatchContext`. One context is created per
//! request and discarded when dispatch completes.

use std::io;
use std::sync::Arc;

/// Read-only view of the inbound request.
///
/// Implementations are expected to be cheap accessors over already-parsed
/// request data; the core calls them multiple times per dispatch.
pub trait RequestContext: Send + Sync {
    /// The extra path segment the request was routed with, if any.
    ///
    /// `None` means the request carries no matchable path and no mapping
    /// will be selected.
    fn path_info(&self) -> Option<&str>;

    /// The first value of the named header, if present.
    fn header_value(&self, name: &str) -> Option<&str>;

    /// All values of the named header, in send order. Empty when absent.
    fn header_values(&self, name: &str) -> Vec<String>;

    /// The value of the named query parameter, if present.
    fn query_param(&self, name: &str) -> Option<&str>;
}

/// Write side of the response.
///
/// Methods take `&self`: sinks are shared across the pipeline for the
/// duration of one request, so implementations use interior mutability.
pub trait ResponseSink: Send + Sync {
    /// Sends an error-class status with a short message.
    fn send_error(&self, status: u16, message: &str) -> io::Result<()>;

    /// Writes the response body bytes.
    fn write_body(&self, body: &[u8]) -> io::Result<()>;

    /// Marks the response complete; further processing phases are skipped.
    fn mark_complete(&self);

    /// Whether the response has been marked complete.
    fn is_complete(&self) -> bool;
}

/// The per-request pair of collaborator ports handed to a lifecycle.
///
/// Created fresh for every request, never cached.
pub struct DispatchContext {
    request: Arc<dyn RequestContext>,
    response: Arc<dyn ResponseSink>,
}

impl DispatchContext {
    /// Creates a new dispatch context from its two ports.
    pub fn new(request: Arc<dyn RequestContext>, response: Arc<dyn ResponseSink>) -> Self {
        Self { request, response }
    }

    /// Returns the request port.
    pub fn request(&self) -> &dyn RequestContext {
        self.request.as_ref()
    }

    /// Returns the response port.
    pub fn response(&self) -> &dyn ResponseSink {
        self.response.as_ref()
    }
}

impl std::fmt::Debug for DispatchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchContext")
            .field("path_info", &self.request.path_info())
            .field("response_complete", &self.response.is_complete())
            .finish_non_exhaustive()
    }
}
