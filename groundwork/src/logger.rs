//! The default service registrar: installs a daily-rolling file logger configured from the
//! assembled configuration and registers it into the service collection.

use crate::construction::FrameworkConstruction;
use crate::error::FrameworkError;
use std::path::Path;
use tracing::dispatcher;
use tracing::Dispatch;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Configuration key holding the log file path.
pub const LOG_FILE_KEY: &str = "Logging:LogFileLocation";

/// Log file used when [LOG_FILE_KEY] is absent from the configuration.
pub const DEFAULT_LOG_FILE: &str = "groundwork.log";

/// Handle to the default logger installed by
/// [add_default_logger](FrameworkConstruction::add_default_logger). Resolvable from the
/// provider; the contained [Dispatch] can be used to route spans and events explicitly
/// when the global default is owned by someone else.
#[derive(Clone)]
pub struct FrameworkLogger {
    dispatch: Dispatch,
    location: String,
}

impl FrameworkLogger {
    /// Builds a daily-rolling file subscriber writing to `location` (unbounded file size,
    /// minimum level `debug` unless overridden through `RUST_LOG`) and installs it as the
    /// global tracing default. An already-installed global default is left in place.
    pub fn install(location: &str) -> Result<Self, FrameworkError> {
        let path = Path::new(location);
        let directory = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(file_name)
            .build(directory)?;

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(appender)
            .with_target(false)
            .with_ansi(false)
            .finish();

        let dispatch = Dispatch::new(subscriber);
        // a previously installed global (tests, hosting processes) wins
        let _ = dispatcher::set_global_default(dispatch.clone());

        Ok(Self {
            dispatch,
            location: location.to_string(),
        })
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// The configured log file path, before the rotation suffix is appended.
    pub fn location(&self) -> &str {
        &self.location
    }
}

impl FrameworkConstruction {
    /// Registers all framework default services. Currently that is the default logger.
    pub fn add_default_services(self) -> Result<Self, FrameworkError> {
        self.add_default_logger()
    }

    /// Reads [LOG_FILE_KEY] from the current configuration snapshot (falling back to
    /// [DEFAULT_LOG_FILE] in the working directory), installs the default rolling file
    /// logger and registers its handle and [Dispatch] as singletons.
    pub fn add_default_logger(mut self) -> Result<Self, FrameworkError> {
        let location = self
            .configuration()
            .ok_or(FrameworkError::MissingConfiguration)?
            .get_string(LOG_FILE_KEY)
            .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

        let logger = FrameworkLogger::install(&location)?;
        let dispatch = logger.dispatch().clone();

        let services = self.services_mut()?;
        services.register_instance(logger);
        services.register_instance(dispatch);

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigurationSnapshot;
    use config::Config;
    use tempfile::tempdir;

    fn snapshot_with_log_file(location: &str) -> ConfigurationSnapshot {
        let config = Config::builder()
            .set_override("logging.logfilelocation", location)
            .unwrap()
            .build()
            .unwrap();
        ConfigurationSnapshot::from_config(config)
    }

    #[test]
    fn should_require_a_configuration_snapshot() {
        let result = FrameworkConstruction::new().add_default_logger();
        assert!(matches!(
            result.unwrap_err(),
            FrameworkError::MissingConfiguration
        ));
    }

    #[test]
    fn should_register_logger_and_dispatch() {
        let directory = tempdir().unwrap();
        let location = directory.path().join("app.log");

        let mut construction = FrameworkConstruction::new()
            .add_configuration(snapshot_with_log_file(&location.to_string_lossy()))
            .unwrap()
            .add_default_logger()
            .unwrap();

        let services = construction.services_mut().unwrap();
        assert!(services.contains::<FrameworkLogger>());
        assert!(services.contains::<Dispatch>());
    }

    #[test]
    fn should_write_through_the_installed_dispatch() {
        let directory = tempdir().unwrap();
        let location = directory.path().join("events.log");

        let logger = FrameworkLogger::install(&location.to_string_lossy()).unwrap();
        assert_eq!(logger.location(), location.to_string_lossy());

        tracing::dispatcher::with_default(logger.dispatch(), || {
            tracing::debug!("logger smoke test");
        });

        // daily rotation appends a date suffix to the configured file name
        let written: Vec<_> = std::fs::read_dir(directory.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry
                    .file_name()
                    .to_string_lossy()
                    .starts_with("events.log")
            })
            .collect();
        assert!(!written.is_empty());
    }
}
