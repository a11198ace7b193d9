//! Process-wide facade over the currently active construction. Intended for a
//! single-writer startup phase ([construct](Framework::construct) then
//! [build](Framework::build)) followed by read-only concurrent
//! [service](Framework::service) resolution; the handle is lock-protected so misuse
//! degrades into an error rather than a data race.

use crate::construction::FrameworkConstruction;
use crate::environment::FrameworkEnvironment;
use crate::error::FrameworkError;
use groundwork_di::collection::ServiceInstancePtr;
use groundwork_di::provider::ServiceProvider;
use std::any::Any;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

static ACTIVE_CONSTRUCTION: RwLock<Option<FrameworkConstruction>> = RwLock::new(None);

/// Entry point to the framework. All methods operate on the single active construction
/// installed by [construct](Self::construct).
pub struct Framework;

impl Framework {
    /// Installs a construction as the process-wide active one, replacing any prior active
    /// construction. Should be called once at the very start of the program.
    pub fn construct(construction: FrameworkConstruction) {
        *write_active() = Some(construction);
    }

    /// Builds a default-configured construction and installs it.
    pub fn construct_default() -> Result<(), FrameworkError> {
        FrameworkConstruction::with_defaults().map(Self::construct)
    }

    /// Runs a closure with mutable access to the active construction, e.g. to register
    /// services before the build.
    pub fn with_construction<F, R>(action: F) -> Result<R, FrameworkError>
    where
        F: FnOnce(&mut FrameworkConstruction) -> R,
    {
        let mut active = write_active();
        let construction = active.as_mut().ok_or(FrameworkError::NotConstructed)?;
        Ok(action(construction))
    }

    /// Builds the active construction, finalizing its registrations into a provider.
    pub fn build() -> Result<(), FrameworkError> {
        Self::with_construction(|construction| construction.build().map(|_| ()))?
    }

    /// Hosted variant of [build](Self::build): adopts a provider built by an external host.
    pub fn adopt_provider(provider: Arc<ServiceProvider>) -> Result<(), FrameworkError> {
        Self::with_construction(|construction| construction.adopt_provider(provider))
    }

    /// The active construction's provider.
    pub fn provider() -> Result<Arc<ServiceProvider>, FrameworkError> {
        let active = read_active();
        let construction = active.as_ref().ok_or(FrameworkError::NotConstructed)?;
        construction.provider().cloned()
    }

    /// Resolves a service of the requested type from the active construction's provider.
    pub fn service<T: Any + Send + Sync>() -> Result<ServiceInstancePtr<T>, FrameworkError> {
        // resolve outside the lock so factories may call back into the facade
        let provider = Self::provider()?;
        provider.get::<T>().map_err(Into::into)
    }

    /// The environment of the active construction.
    pub fn environment() -> Result<FrameworkEnvironment, FrameworkError> {
        let active = read_active();
        active
            .as_ref()
            .map(|construction| *construction.environment())
            .ok_or(FrameworkError::NotConstructed)
    }
}

fn read_active() -> RwLockReadGuard<'static, Option<FrameworkConstruction>> {
    ACTIVE_CONSTRUCTION
        .read()
        .unwrap_or_else(PoisonError::into_inner)
}

fn write_active() -> RwLockWriteGuard<'static, Option<FrameworkConstruction>> {
    ACTIVE_CONSTRUCTION
        .write()
        .unwrap_or_else(PoisonError::into_inner)
}
