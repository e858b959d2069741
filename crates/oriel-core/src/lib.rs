//! # Oriel Core
//!
//! The dispatch engine shared by the Oriel action and REST lifecycles.
//!
//! Given an inbound request, the core finds the handler method whose mapping
//! pattern best matches the request path, binds the method's declared
//! parameters from request data, and invokes it. What happens to the result
//! — view setup or serialized output — is the concern of the lifecycle
//! crates built on top (`oriel-action`, `oriel-rest`).
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────────┐     ┌───────────────────┐     ┌──────────────┐
//! │  MappingMatcher │────▶│ ParameterResolver │────▶│ invoke_match │
//! │  (best match)   │     │ (one per slot)    │     │ (call method)│
//! └─────────────────┘     └───────────────────┘     └──────────────┘
//! ```
//!
//! Everything the core needs from its surroundings comes in through ports:
//! handler discovery ([`HandlerRegistry`]), instance resolution
//! ([`InstanceResolver`]), request data ([`RequestContext`]), and the
//! response sink ([`ResponseSink`]). The core is synchronous — one request
//! is one call chain with no internal suspension points — and all ports are
//! `Send + Sync` so the host may dispatch independent requests from
//! independent threads.

pub mod binding;
pub mod context;
pub mod error;
pub mod executor;
pub mod inject;
pub mod mapping;
pub mod matcher;
pub mod registry;

pub use binding::{Args, BoundValue, ParameterBinding, ParameterResolver, ParameterSpec};
pub use context::{DispatchContext, RequestContext, ResponseSink};
pub use error::{BoxError, DispatchError, DispatchResult};
pub use executor::invoke_match;
pub use inject::{InstanceResolver, SharedInstance, StaticInstances};
pub use mapping::{MappingKind, REGEX_MAPPING_PREFIX, classify};
pub use matcher::{MappingMatch, MappingMatcher};
pub use registry::{
    HandlerBuilder, HandlerDescriptor, HandlerMethod, HandlerRegistry, InvokeFn,
    StaticHandlerRegistry,
};

/// Prelude for common imports.
pub mod prelude {
    pub use super::binding::{Args, BoundValue, ParameterBinding, ParameterResolver, ParameterSpec};
    pub use super::context::{DispatchContext, RequestContext, ResponseSink};
    pub use super::error::{BoxError, DispatchError, DispatchResult};
    pub use super::inject::{InstanceResolver, SharedInstance, StaticInstances};
    pub use super::mapping::MappingKind;
    pub use super::matcher::{MappingMatch, MappingMatcher};
    pub use super::registry::{HandlerDescriptor, HandlerRegistry, StaticHandlerRegistry};
}
