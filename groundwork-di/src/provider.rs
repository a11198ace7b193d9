//! Read-only resolution of service instances from finalized registrations.

use crate::collection::{ServiceDescriptor, ServiceInstanceAnyPtr, ServiceInstancePtr, ServiceLifetime};
use crate::error::ServiceResolutionError;
use crate::scope::{Scope, SingletonScope, TransientScope};
use fxhash::{FxHashMap, FxHashSet};
use std::any::{type_name, Any, TypeId};
use std::cell::RefCell;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

thread_local! {
    // Types whose factories are currently running on this thread, for cycle detection.
    static UNDER_CONSTRUCTION: RefCell<FxHashSet<TypeId>> = RefCell::new(FxHashSet::default());
}

struct ConstructionGuard {
    type_id: TypeId,
}

impl ConstructionGuard {
    fn enter(type_id: TypeId, type_name: &'static str) -> Result<Self, ServiceResolutionError> {
        let entered = UNDER_CONSTRUCTION.with(|types| types.borrow_mut().insert(type_id));
        if entered {
            Ok(Self { type_id })
        } else {
            Err(ServiceResolutionError::DependencyCycle(type_name))
        }
    }
}

impl Drop for ConstructionGuard {
    fn drop(&mut self) {
        UNDER_CONSTRUCTION.with(|types| {
            types.borrow_mut().remove(&self.type_id);
        });
    }
}

/// Immutable resolver built from a [ServiceCollection](crate::collection::ServiceCollection).
/// Resolution by type always consults the last registration made for that type. Singleton
/// instances are created lazily and cached; the cache lock is not held while a factory runs,
/// so factories may resolve their own dependencies through the same provider.
pub struct ServiceProvider {
    descriptors: Vec<ServiceDescriptor>,
    index: FxHashMap<TypeId, usize>,
    singletons: Mutex<SingletonScope>,
    transients: TransientScope,
}

impl std::fmt::Debug for ServiceProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceProvider").finish_non_exhaustive()
    }
}

impl ServiceProvider {
    pub(crate) fn new(descriptors: Vec<ServiceDescriptor>) -> Self {
        // later registrations overwrite earlier ones for the same type
        let index = descriptors
            .iter()
            .enumerate()
            .map(|(position, descriptor)| (descriptor.type_id(), position))
            .collect();

        Self {
            descriptors,
            index,
            singletons: Mutex::new(SingletonScope::default()),
            transients: TransientScope,
        }
    }

    /// Resolves an instance of `T`, creating it if the registered lifetime requires.
    pub fn get<T: Any + Send + Sync>(&self) -> Result<ServiceInstancePtr<T>, ServiceResolutionError> {
        self.resolve_any(TypeId::of::<T>(), type_name::<T>())
            .and_then(|instance| {
                instance
                    .downcast::<T>()
                    .map_err(|_| ServiceResolutionError::IncompatibleInstance(type_name::<T>()))
            })
    }

    /// Like [get](Self::get), but maps a missing registration to `None` instead of an error.
    pub fn get_option<T: Any + Send + Sync>(
        &self,
    ) -> Result<Option<ServiceInstancePtr<T>>, ServiceResolutionError> {
        match self.get::<T>() {
            Ok(instance) => Ok(Some(instance)),
            Err(ServiceResolutionError::NotRegistered(_)) => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Checks if a registration for `T` exists, without creating anything.
    pub fn contains<T: Any>(&self) -> bool {
        self.index.contains_key(&TypeId::of::<T>())
    }

    fn resolve_any(
        &self,
        type_id: TypeId,
        type_name: &'static str,
    ) -> Result<ServiceInstanceAnyPtr, ServiceResolutionError> {
        let descriptor = self
            .index
            .get(&type_id)
            .and_then(|&position| self.descriptors.get(position))
            .ok_or(ServiceResolutionError::NotRegistered(type_name))?;

        let cached = match descriptor.lifetime() {
            ServiceLifetime::Singleton => self.lock_singletons().instance(type_id),
            ServiceLifetime::Transient => self.transients.instance(type_id),
        };
        if let Some(existing) = cached {
            return Ok(existing);
        }

        let _guard = ConstructionGuard::enter(type_id, type_name)?;
        let factory = descriptor.factory().as_ref();
        let created = factory(self)
            .map_err(|error| ServiceResolutionError::FactoryError(type_name, error))?;

        debug!("Created an instance of {}.", type_name);

        match descriptor.lifetime() {
            ServiceLifetime::Singleton => {
                let mut singletons = self.lock_singletons();
                // another thread may have won the race while the factory was running
                if let Some(existing) = singletons.instance(type_id) {
                    Ok(existing)
                } else {
                    singletons.store_instance(type_id, created.clone());
                    Ok(created)
                }
            }
            ServiceLifetime::Transient => Ok(created),
        }
    }

    fn lock_singletons(&self) -> MutexGuard<'_, SingletonScope> {
        self.singletons
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
