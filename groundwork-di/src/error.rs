use std::error::Error;
use std::sync::Arc;
use thiserror::Error;

/// Shared pointer to a generic error, used where factories can fail with arbitrary errors.
pub type ErrorPtr = Arc<dyn Error + Send + Sync>;

/// Errors related to resolving service instances from a provider.
#[derive(Error, Clone, Debug)]
pub enum ServiceResolutionError {
    #[error("no service registered for type '{0}'")]
    NotRegistered(&'static str),
    #[error("registered factory for type '{0}' produced an instance of an incompatible type")]
    IncompatibleInstance(&'static str),
    #[error("dependency cycle detected while constructing an instance of '{0}'")]
    DependencyCycle(&'static str),
    #[error("service factory for type '{0}' failed: {1}")]
    FactoryError(&'static str, ErrorPtr),
}
