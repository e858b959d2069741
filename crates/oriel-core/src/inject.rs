//! Type-erased instance resolution.
//!
//! The dispatch core does not own a dependency-injection container; it only
//! needs "resolve an instance by type" as an opaque capability. The
//! [`InstanceResolver`] port is passed explicitly into the executor and the
//! parameter resolvers — there is no ambient service locator.
//!
//! [`StaticInstances`] is the bundled implementation: a `TypeId`-keyed map
//! populated up front by the host. Lookups are read-only and safe to share
//! across concurrently dispatched requests.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

/// A type-erased, shared instance.
///
/// Downcast back to `Arc<T>` with [`Arc::downcast`] or borrow the concrete
/// type with `downcast_ref::<T>()`.
pub type SharedInstance = Arc<dyn Any + Send + Sync>;

/// Port for resolving an instance of a given type.
///
/// Used both to obtain the handler instance a matched method is invoked on
/// and to satisfy fallback parameter injection. Implementations must support
/// concurrent lookups from independent requests.
pub trait InstanceResolver: Send + Sync {
    /// Resolves an instance of the type identified by `type_id`.
    fn resolve(&self, type_id: TypeId) -> Option<SharedInstance>;
}

/// A map-backed [`InstanceResolver`] populated at startup.
#[derive(Default)]
pub struct StaticInstances {
    instances: HashMap<TypeId, SharedInstance>,
}

impl StaticInstances {
    /// Creates an empty instance map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an instance, replacing any previous instance of the same type.
    pub fn insert<T: Send + Sync + 'static>(&mut self, instance: T) {
        self.instances.insert(TypeId::of::<T>(), Arc::new(instance));
    }

    /// Registers an already-shared instance.
    pub fn insert_arc<T: Send + Sync + 'static>(&mut self, instance: Arc<T>) {
        self.instances.insert(TypeId::of::<T>(), instance);
    }

    /// Registers an instance (builder pattern).
    pub fn with<T: Send + Sync + 'static>(mut self, instance: T) -> Self {
        self.insert(instance);
        self
    }

    /// Resolves a typed instance, if registered.
    pub fn get<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.instances
            .get(&TypeId::of::<T>())
            .and_then(|shared| Arc::clone(shared).downcast::<T>().ok())
    }

    /// Returns the number of registered instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Returns `true` if no instances are registered.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl InstanceResolver for StaticInstances {
    fn resolve(&self, type_id: TypeId) -> Option<SharedInstance> {
        self.instances.get(&type_id).map(Arc::clone)
    }
}
