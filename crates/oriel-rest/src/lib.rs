//! # Oriel REST
//!
//! The REST lifecycle: dispatch an inbound request to a handler method,
//! take its payload untouched, and serialize it through a content-type
//! specific writer straight into the response — no render phase involved.
//!
//! Built on `oriel-core` for matching, parameter binding, and invocation;
//! this crate adds the REST parameter resolver (multi-valued headers), the
//! payload executor, the writer registry with the JSON writer, and the
//! lifecycle that ties them together.
//!
//! ## Example
//!
//! ```rust,ignore
//! let registry = StaticHandlerRegistry::new().with(
//!     HandlerDescriptor::of::<ItemApi>()
//!         .route(
//!             "get_item",
//!             "regex:/items/(?<nr>[0-9]+)",
//!             vec![ParameterSpec::path_capture("nr")],
//!             |api: &ItemApi, args| api.get(args.required_text(0)?),
//!         )
//!         .build(),
//! );
//!
//! let lifecycle = RestLifecycle::new(Arc::new(registry), instances);
//! lifecycle.dispatch(&ctx)?;
//! ```

pub mod executor;
pub mod lifecycle;
pub mod resolver;
pub mod writer;

pub use executor::{RestMethodExecutor, RestPayload};
pub use lifecycle::{RestConfig, RestLifecycle};
pub use resolver::RestParameterResolver;
pub use writer::{JSON_CONTENT_TYPE, JsonResponseWriter, ResponseWriter, WriterRegistry};
