//! # Oriel Action
//!
//! The action lifecycle: dispatch an inbound request to a handler method
//! that returns a view id, establish the view, and hand the request to the
//! hosting framework's render phase.
//!
//! Built on `oriel-core` for matching, parameter binding, and invocation;
//! this crate adds the view-facing half — view ports, the action parameter
//! resolver (single-valued headers), the executor that turns a returned
//! view id into view state, and the responder holding the lazily resolved
//! default render pipeline.
//!
//! ## Example
//!
//! ```rust,ignore
//! let registry = StaticHandlerRegistry::new().with(
//!     HandlerDescriptor::of::<OrderPages>()
//!         .route(
//!             "show_order",
//!             "regex:/orders/(?<nr>[0-9]+)",
//!             vec![ParameterSpec::path_capture("nr")],
//!             |pages: &OrderPages, args| pages.show(args.required_text(0)?),
//!         )
//!         .build(),
//! );
//!
//! let lifecycle = ActionLifecycle::new(Arc::new(registry), instances, pipelines);
//! lifecycle.dispatch(&ctx)?;
//! ```

pub mod context;
pub mod executor;
pub mod lifecycle;
pub mod resolver;
pub mod responder;
pub mod view;

pub use context::ActionContext;
pub use executor::ActionMethodExecutor;
pub use lifecycle::{ActionConfig, ActionLifecycle};
pub use resolver::ActionParameterResolver;
pub use responder::ActionResponder;
pub use view::{RenderPipeline, RenderPipelineFactory, ViewContext, ViewHandle};
