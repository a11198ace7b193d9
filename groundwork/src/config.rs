//! The configuration assembler. Merges environment variables and up to two optional JSON
//! files into one immutable [ConfigurationSnapshot], with a customization hook for extra
//! sources. Precedence, lowest to highest: environment variables, `appsettings.json`,
//! `appsettings.<Label>.json`, caller-added sources. Later sources override earlier ones
//! key by key; missing files are tolerated.

use crate::construction::FrameworkConstruction;
use crate::environment::FrameworkEnvironment;
use crate::error::FrameworkError;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the base configuration file, looked up in the working directory.
pub const BASE_CONFIG_FILE: &str = "appsettings.json";

/// Separator for nesting hierarchical keys in environment variable names,
/// e.g. `LOGGING__LOGFILELOCATION`.
pub const ENV_KEY_SEPARATOR: &str = "__";

/// Builder the customization callback receives; sources added to it take the highest
/// precedence.
pub type ConfigurationBuilder = ConfigBuilder<DefaultState>;

/// Immutable merged configuration. Keys are hierarchical and looked up case-insensitively
/// with colon-delimited paths (`Logging:LogFileLocation`), matching the layout of the
/// `appsettings` files.
#[derive(Clone, Debug)]
pub struct ConfigurationSnapshot {
    config: Config,
}

impl ConfigurationSnapshot {
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Returns the string value for a colon-delimited key, or `None` when the key is
    /// absent or not convertible to a string.
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.config.get_string(&flatten_key(key)).ok()
    }

    /// Deserializes the section under a colon-delimited key into a typed value.
    pub fn get_section<'de, T: Deserialize<'de>>(&self, key: &str) -> Result<T, FrameworkError> {
        self.config.get(&flatten_key(key)).map_err(Into::into)
    }

    pub fn as_config(&self) -> &Config {
        &self.config
    }

    pub fn into_config(self) -> Config {
        self.config
    }
}

// The config crate addresses values with dot-delimited lowercase paths.
fn flatten_key(key: &str) -> String {
    key.replace(':', ".")
}

/// Merges the default sources for the given environment into a snapshot. File names are
/// resolved against `base_dir` when given, otherwise against the working directory. The
/// customization callback receives the builder last, so sources it adds override
/// everything else.
pub fn assemble_configuration<F>(
    base_dir: Option<&Path>,
    environment: &FrameworkEnvironment,
    customize: F,
) -> Result<ConfigurationSnapshot, ConfigError>
where
    F: FnOnce(ConfigurationBuilder) -> ConfigurationBuilder,
{
    let environment_file = format!("appsettings.{}.json", environment.label());

    let builder = Config::builder()
        .add_source(Environment::default().separator(ENV_KEY_SEPARATOR))
        .add_source(
            File::from(resolve_file(base_dir, BASE_CONFIG_FILE))
                .format(FileFormat::Json)
                .required(false),
        )
        .add_source(
            File::from(resolve_file(base_dir, &environment_file))
                .format(FileFormat::Json)
                .required(false),
        );

    customize(builder)
        .build()
        .map(ConfigurationSnapshot::from_config)
}

fn resolve_file(base_dir: Option<&Path>, name: &str) -> PathBuf {
    match base_dir {
        Some(directory) => directory.join(name),
        None => PathBuf::from(name),
    }
}

impl FrameworkConstruction {
    /// Assembles the default configuration sources into a snapshot, stores it on the
    /// construction and registers it as a resolvable singleton. Re-running the assembler
    /// replaces any prior snapshot outright.
    pub fn add_default_configuration(self) -> Result<Self, FrameworkError> {
        self.add_default_configuration_with(|builder| builder)
    }

    /// Like [add_default_configuration](Self::add_default_configuration), additionally
    /// giving the caller the mutable source list before finalization.
    pub fn add_default_configuration_with<F>(self, customize: F) -> Result<Self, FrameworkError>
    where
        F: FnOnce(ConfigurationBuilder) -> ConfigurationBuilder,
    {
        let snapshot = assemble_configuration(None, self.environment(), customize)?;
        self.add_configuration(snapshot)
    }

    /// Stores a caller-provided snapshot and registers it as a resolvable singleton.
    pub fn add_configuration(
        mut self,
        snapshot: ConfigurationSnapshot,
    ) -> Result<Self, FrameworkError> {
        self.services_mut()?.register_instance(snapshot.clone());
        self.use_configuration(snapshot);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_flatten_colon_delimited_keys() {
        assert_eq!(flatten_key("Logging:LogFileLocation"), "Logging.LogFileLocation");
        assert_eq!(flatten_key("flat"), "flat");
    }

    #[test]
    fn snapshot_should_look_up_colon_delimited_keys() {
        let config = Config::builder()
            .set_override("logging.logfilelocation", "/tmp/x.log")
            .unwrap()
            .build()
            .unwrap();
        let snapshot = ConfigurationSnapshot::from_config(config);

        assert_eq!(
            snapshot.get_string("Logging:LogFileLocation").as_deref(),
            Some("/tmp/x.log")
        );
        assert!(snapshot.get_string("Logging:Missing").is_none());
    }

    #[test]
    fn add_configuration_should_store_and_register_the_snapshot() {
        let snapshot =
            ConfigurationSnapshot::from_config(Config::builder().build().unwrap());

        let mut construction = FrameworkConstruction::new()
            .add_configuration(snapshot)
            .unwrap();

        assert!(construction.configuration().is_some());
        assert!(construction
            .services_mut()
            .unwrap()
            .contains::<ConfigurationSnapshot>());
    }
}
