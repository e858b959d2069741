//! Handler discovery: methods, descriptors, and the registry port.
//!
//! In place of runtime reflection, handler methods are reified at
//! registration time: each [`HandlerMethod`] pairs a mapping pattern and a
//! parameter-slot list with a type-erased invoke closure. Methods are grouped
//! into a [`HandlerDescriptor`] per handler type through the typed
//! [`HandlerBuilder`], so a method can only ever be attached to the type it
//! was written against — the (handler, method) pair of a match is consistent
//! by construction.
//!
//! # Example
//!
//! ```rust,ignore
//! struct UserPages;
//!
//! let descriptor = HandlerDescriptor::of::<UserPages>()
//!     .route(
//!         "show_user",
//!         "regex:/users/(?<id>[0-9]+)",
//!         vec![ParameterSpec::path_capture("id")],
//!         |_pages: &UserPages, args| Ok(format!("/user/{}.page", args.required_text(0)?)),
//!     )
//!     .build();
//!
//! let registry = StaticHandlerRegistry::new().with(descriptor);
//! ```

use std::any::TypeId;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::binding::{Args, ParameterSpec};
use crate::error::BoxError;
use crate::inject::SharedInstance;

/// Type-erased invoke closure stored per handler method.
pub type InvokeFn<R> =
    Arc<dyn Fn(&SharedInstance, Args<'_>) -> Result<R, BoxError> + Send + Sync>;

/// One handler method: a mapping declaration, its parameter slots, and the
/// closure that runs it against a resolved handler instance.
pub struct HandlerMethod<R: 'static> {
    name: String,
    mapping: String,
    params: Vec<ParameterSpec>,
    invoke: InvokeFn<R>,
}

impl<R: 'static> HandlerMethod<R> {
    fn new<T, F>(
        name: impl Into<String>,
        mapping: impl Into<String>,
        params: Vec<ParameterSpec>,
        handler: F,
    ) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&T, Args<'_>) -> Result<R, BoxError> + Send + Sync + 'static,
    {
        let invoke: InvokeFn<R> = Arc::new(move |instance, args| {
            let target = instance.downcast_ref::<T>().ok_or_else(|| {
                BoxError::from(format!(
                    "handler instance is not a {}",
                    std::any::type_name::<T>()
                ))
            })?;
            handler(target, args)
        });
        Self {
            name: name.into(),
            mapping: mapping.into(),
            params,
            invoke,
        }
    }

    /// The method name, used in diagnostics and error wrapping.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared mapping pattern string.
    pub fn mapping(&self) -> &str {
        &self.mapping
    }

    /// The declared parameter slots, in declaration order.
    pub fn params(&self) -> &[ParameterSpec] {
        &self.params
    }

    /// Invokes the method on a resolved instance with a resolved parameter
    /// vector.
    pub fn invoke(&self, instance: &SharedInstance, args: Args<'_>) -> Result<R, BoxError> {
        (self.invoke)(instance, args)
    }
}

impl<R: 'static> std::fmt::Debug for HandlerMethod<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerMethod")
            .field("name", &self.name)
            .field("mapping", &self.mapping)
            .field("params", &self.params.len())
            .finish_non_exhaustive()
    }
}

/// The registry's record of one handler type: its identity plus every method
/// that carries a mapping declaration.
pub struct HandlerDescriptor<R: 'static> {
    type_id: TypeId,
    type_name: &'static str,
    methods: Vec<Arc<HandlerMethod<R>>>,
}

impl<R: 'static> HandlerDescriptor<R> {
    /// Starts a descriptor for handler type `T`.
    pub fn of<T: Send + Sync + 'static>() -> HandlerBuilder<T, R> {
        HandlerBuilder {
            methods: Vec::new(),
            _target: PhantomData,
        }
    }

    /// The handler's declared type.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The handler's type name, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The handler's mapped methods, in declaration order.
    pub fn methods(&self) -> &[Arc<HandlerMethod<R>>] {
        &self.methods
    }
}

impl<R: 'static> std::fmt::Debug for HandlerDescriptor<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerDescriptor")
            .field("type_name", &self.type_name)
            .field("methods", &self.methods.len())
            .finish()
    }
}

/// Builder attaching mapped methods to one handler type.
pub struct HandlerBuilder<T, R: 'static> {
    methods: Vec<Arc<HandlerMethod<R>>>,
    _target: PhantomData<fn(&T)>,
}

impl<T: Send + Sync + 'static, R: 'static> HandlerBuilder<T, R> {
    /// Declares a mapped method.
    ///
    /// `params` lists the method's parameter slots in declaration order; the
    /// invoke pipeline hands the closure a resolved [`Args`] vector of the
    /// same length.
    pub fn route<F>(
        mut self,
        name: impl Into<String>,
        mapping: impl Into<String>,
        params: Vec<ParameterSpec>,
        handler: F,
    ) -> Self
    where
        F: Fn(&T, Args<'_>) -> Result<R, BoxError> + Send + Sync + 'static,
    {
        self.methods
            .push(Arc::new(HandlerMethod::new::<T, F>(name, mapping, params, handler)));
        self
    }

    /// Finishes the descriptor.
    pub fn build(self) -> HandlerDescriptor<R> {
        HandlerDescriptor {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            methods: self.methods,
        }
    }
}

/// Port for handler discovery.
///
/// Discovery order is the source's natural order; the matcher scans it as
/// given and makes no ordering guarantees beyond what the source provides.
pub trait HandlerRegistry<R: 'static>: Send + Sync {
    /// Every discoverable handler descriptor.
    fn handlers(&self) -> Vec<Arc<HandlerDescriptor<R>>>;
}

/// A `Vec`-backed [`HandlerRegistry`] with deterministic registration order.
///
/// Callers that need stable match selection among equally specific
/// candidates get it for free here: handlers are scanned in the order they
/// were registered, on every call.
pub struct StaticHandlerRegistry<R: 'static> {
    handlers: Vec<Arc<HandlerDescriptor<R>>>,
}

impl<R: 'static> StaticHandlerRegistry<R> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Registers a handler descriptor.
    pub fn register(&mut self, descriptor: HandlerDescriptor<R>) {
        self.handlers.push(Arc::new(descriptor));
    }

    /// Registers a handler descriptor (builder pattern).
    pub fn with(mut self, descriptor: HandlerDescriptor<R>) -> Self {
        self.register(descriptor);
        self
    }

    /// Returns the number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<R: 'static> Default for StaticHandlerRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: 'static> HandlerRegistry<R> for StaticHandlerRegistry<R> {
    fn handlers(&self) -> Vec<Arc<HandlerDescriptor<R>>> {
        self.handlers.clone()
    }
}
