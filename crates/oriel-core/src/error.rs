//! Unified error types for the Oriel dispatch core.
//!
//! Failing to match a request path is deliberately *not* an error: it is the
//! `None` arm of [`MappingMatcher::match_request`](crate::matcher::MappingMatcher::match_request)
//! and the lifecycle answers it with a 404-class response. Everything in
//! [`DispatchError`] is fatal to the current request and expected to be
//! translated into a transport-level error response by the hosting layer.

use thiserror::Error;

/// Boxed error type returned by handler method closures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors fatal to a single request's dispatch.
///
/// No variant is retried and none has multi-request impact; the pipeline
/// aborts the current request and propagates the error to the host.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The effective mapping string could not be compiled as a regular
    /// expression while binding a path capture.
    #[error("mapping '{mapping}' is not a valid capture pattern")]
    InvalidCapturePattern {
        /// The effective mapping string that failed to compile.
        mapping: String,
        /// The underlying compile error.
        #[source]
        source: regex::Error,
    },

    /// A path-capture binding failed: the named group does not exist in the
    /// mapping, or the mapping no longer matches the path it was selected
    /// for. Either way the registration is misconfigured.
    #[error("unable to bind path capture '{group}' from mapping '{mapping}'")]
    CaptureUnbound {
        /// The capture group named by the parameter binding.
        group: String,
        /// The effective mapping string.
        mapping: String,
    },

    /// No instance is available for a handler type or an injected parameter
    /// type.
    #[error("no instance available for type '{type_name}'")]
    UnresolvedInstance {
        /// Name of the type that could not be resolved.
        type_name: String,
    },

    /// The handler method itself failed during execution.
    #[error("handler method '{method}' failed")]
    Invocation {
        /// Name of the failed handler method.
        method: String,
        /// The handler's own error, wrapped uniformly.
        #[source]
        source: BoxError,
    },

    /// A response writer failed to encode the result payload.
    #[error("failed to serialize response payload as '{content_type}'")]
    Serialize {
        /// Content type of the writer that failed.
        content_type: String,
        /// The underlying encoder error.
        #[source]
        source: BoxError,
    },

    /// Writing to the response sink failed.
    #[error("failed to write response")]
    Write(#[source] std::io::Error),

    /// No response writer is registered for the negotiated content type.
    #[error("no response writer registered for '{content_type}'")]
    UnknownContentType {
        /// The content type that had no writer.
        content_type: String,
    },
}

impl DispatchError {
    /// Creates an [`DispatchError::UnresolvedInstance`] for the given type name.
    pub fn unresolved(type_name: impl Into<String>) -> Self {
        Self::UnresolvedInstance {
            type_name: type_name.into(),
        }
    }

    /// Wraps a handler failure as an [`DispatchError::Invocation`].
    pub fn invocation(method: impl Into<String>, source: BoxError) -> Self {
        Self::Invocation {
            method: method.into(),
            source,
        }
    }
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;
