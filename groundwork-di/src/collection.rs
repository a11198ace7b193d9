//! Ordered, mutable service registrations, later consumed to build a
//! [ServiceProvider](crate::provider::ServiceProvider).

use crate::error::ErrorPtr;
use crate::provider::ServiceProvider;
use std::any::{type_name, Any, TypeId};
use std::sync::Arc;

pub type ServiceInstancePtr<T> = Arc<T>;
pub type ServiceInstanceAnyPtr = Arc<dyn Any + Send + Sync>;

/// Factory producing a type-erased service instance, with access to the provider for
/// resolving its own dependencies.
pub type ServiceFactory =
    Arc<dyn Fn(&ServiceProvider) -> Result<ServiceInstanceAnyPtr, ErrorPtr> + Send + Sync>;

/// Determines when a provider reuses an instance or creates a fresh one.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum ServiceLifetime {
    /// One instance per provider, created on first resolution and cached.
    Singleton,
    /// A new instance on every resolution.
    Transient,
}

/// A single (type, lifetime, factory) registration.
#[derive(Clone)]
pub struct ServiceDescriptor {
    type_id: TypeId,
    type_name: &'static str,
    lifetime: ServiceLifetime,
    factory: ServiceFactory,
}

impl ServiceDescriptor {
    /// Creates a descriptor for `T` from a strongly-typed factory.
    pub fn new<T, F>(lifetime: ServiceLifetime, factory: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&ServiceProvider) -> Result<T, ErrorPtr> + Send + Sync + 'static,
    {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            lifetime,
            factory: Arc::new(move |provider| {
                factory(provider).map(|instance| Arc::new(instance) as ServiceInstanceAnyPtr)
            }),
        }
    }

    /// Creates a singleton descriptor from an already constructed instance.
    pub fn from_instance<T: Any + Send + Sync>(instance: T) -> Self {
        let instance: ServiceInstanceAnyPtr = Arc::new(instance);
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            lifetime: ServiceLifetime::Singleton,
            factory: Arc::new(move |_| Ok(instance.clone())),
        }
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn lifetime(&self) -> ServiceLifetime {
        self.lifetime
    }

    #[inline]
    pub(crate) fn factory(&self) -> &ServiceFactory {
        &self.factory
    }
}

/// Ordered list of service registrations. For a given type, the last registration shadows
/// all earlier ones at resolution time; the earlier entries are kept but never consulted.
#[derive(Clone, Default)]
pub struct ServiceCollection {
    descriptors: Vec<ServiceDescriptor>,
}

impl std::fmt::Debug for ServiceCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceCollection").finish_non_exhaustive()
    }
}

impl ServiceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a singleton created lazily by the given factory.
    pub fn register_singleton<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Any + Send + Sync,
        F: Fn(&ServiceProvider) -> Result<T, ErrorPtr> + Send + Sync + 'static,
    {
        self.register(ServiceDescriptor::new(ServiceLifetime::Singleton, factory))
    }

    /// Registers a service created anew on every resolution.
    pub fn register_transient<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Any + Send + Sync,
        F: Fn(&ServiceProvider) -> Result<T, ErrorPtr> + Send + Sync + 'static,
    {
        self.register(ServiceDescriptor::new(ServiceLifetime::Transient, factory))
    }

    /// Registers an already constructed instance as a singleton.
    pub fn register_instance<T: Any + Send + Sync>(&mut self, instance: T) -> &mut Self {
        self.register(ServiceDescriptor::from_instance(instance))
    }

    pub fn register(&mut self, descriptor: ServiceDescriptor) -> &mut Self {
        self.descriptors.push(descriptor);
        self
    }

    /// Checks if any registration exists for `T`.
    pub fn contains<T: Any>(&self) -> bool {
        let type_id = TypeId::of::<T>();
        self.descriptors
            .iter()
            .any(|descriptor| descriptor.type_id == type_id)
    }

    pub fn descriptors(&self) -> &[ServiceDescriptor] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Consumes the collection, finalizing the registrations into a resolvable provider.
    pub fn build_provider(self) -> ServiceProvider {
        ServiceProvider::new(self.descriptors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestService;

    #[test]
    fn should_report_registered_types() {
        let mut collection = ServiceCollection::new();
        assert!(collection.is_empty());
        assert!(!collection.contains::<TestService>());

        collection.register_singleton(|_| Ok(TestService));

        assert_eq!(collection.len(), 1);
        assert!(collection.contains::<TestService>());
        assert!(!collection.contains::<i32>());
    }

    #[test]
    fn should_keep_registration_order() {
        let mut collection = ServiceCollection::new();
        collection
            .register_instance(1_i32)
            .register_instance(2_i32);

        let descriptors = collection.descriptors();
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0].type_id(), descriptors[1].type_id());
        assert_eq!(descriptors[0].lifetime(), ServiceLifetime::Singleton);
    }
}
