//! Instance scopes decide when a resolved instance is reused and when a fresh one is
//! created. The provider keeps one [SingletonScope] for shared instances; transient
//! registrations go through the stateless [TransientScope].

use crate::collection::ServiceInstanceAnyPtr;
use fxhash::FxHashMap;
use std::any::TypeId;

/// A container of service instances for one lifetime.
pub trait Scope {
    /// Returns a previously stored instance for the given type, if this scope retains any.
    fn instance(&self, type_id: TypeId) -> Option<ServiceInstanceAnyPtr>;

    /// Stores an instance for later reuse. Scopes which never reuse instances ignore it.
    fn store_instance(&mut self, type_id: TypeId, instance: ServiceInstanceAnyPtr);
}

/// Scope caching one instance per type for the lifetime of the provider.
#[derive(Default)]
pub struct SingletonScope {
    instances: FxHashMap<TypeId, ServiceInstanceAnyPtr>,
}

impl Scope for SingletonScope {
    #[inline]
    fn instance(&self, type_id: TypeId) -> Option<ServiceInstanceAnyPtr> {
        self.instances.get(&type_id).cloned()
    }

    #[inline]
    fn store_instance(&mut self, type_id: TypeId, instance: ServiceInstanceAnyPtr) {
        self.instances.insert(type_id, instance);
    }
}

/// Scope which never retains instances, forcing a new one on each resolution.
#[derive(Default, Copy, Clone, Eq, PartialEq)]
pub struct TransientScope;

impl Scope for TransientScope {
    #[inline]
    fn instance(&self, _type_id: TypeId) -> Option<ServiceInstanceAnyPtr> {
        None
    }

    #[inline]
    fn store_instance(&mut self, _type_id: TypeId, _instance: ServiceInstanceAnyPtr) {}
}
