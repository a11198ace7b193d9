use config::ConfigError;
use groundwork_di::error::ServiceResolutionError;
use thiserror::Error;
use tracing_appender::rolling::InitError;

/// Errors surfaced by the construction lifecycle and the framework facade.
#[derive(Error, Debug)]
pub enum FrameworkError {
    #[error("no configuration has been set on the construction")]
    MissingConfiguration,
    #[error("the construction has already been built")]
    AlreadyBuilt,
    #[error("no active construction - call Framework::construct first")]
    NotConstructed,
    #[error("the active construction has not been built")]
    NotBuilt,
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),
    #[error("cannot initialize the log file appender: {0}")]
    LoggerInit(#[from] InitError),
    #[error("service resolution error: {0}")]
    Resolution(#[from] ServiceResolutionError),
}
