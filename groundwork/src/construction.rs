//! The construction builder aggregating configuration, service registrations and
//! environment state before finalization into a provider.

use crate::config::{ConfigurationBuilder, ConfigurationSnapshot};
use crate::environment::FrameworkEnvironment;
use crate::error::FrameworkError;
use groundwork_di::collection::ServiceCollection;
use groundwork_di::provider::ServiceProvider;
use std::sync::Arc;
use tracing::info;

/// Mutable builder for the application's dependency graph. A construction goes through
/// three phases: configuration (usually via
/// [add_default_configuration](Self::add_default_configuration)), service registration,
/// and a single [build](Self::build) which finalizes the registrations into an immutable
/// [ServiceProvider]. Registrations are only mutable before the build; configuration must
/// be set before it.
pub struct FrameworkConstruction {
    services: Option<ServiceCollection>,
    configuration: Option<ConfigurationSnapshot>,
    environment: FrameworkEnvironment,
    provider: Option<Arc<ServiceProvider>>,
}

impl std::fmt::Debug for FrameworkConstruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameworkConstruction").finish_non_exhaustive()
    }
}

impl FrameworkConstruction {
    /// Creates an empty construction with a probed environment and no configuration.
    pub fn new() -> Self {
        Self::with_environment(FrameworkEnvironment::detect())
    }

    /// Creates an empty construction for an explicitly chosen environment.
    pub fn with_environment(environment: FrameworkEnvironment) -> Self {
        Self {
            services: Some(ServiceCollection::new()),
            configuration: None,
            environment,
            provider: None,
        }
    }

    /// Creates a construction with the default configuration sources and default services
    /// already applied.
    pub fn with_defaults() -> Result<Self, FrameworkError> {
        Self::new().add_default_configuration()?.add_default_services()
    }

    /// Like [with_defaults](Self::with_defaults), additionally letting the caller customize
    /// the configuration sources before they are finalized.
    pub fn with_defaults_customized<F>(customize: F) -> Result<Self, FrameworkError>
    where
        F: FnOnce(ConfigurationBuilder) -> ConfigurationBuilder,
    {
        Self::new()
            .add_default_configuration_with(customize)?
            .add_default_services()
    }

    pub fn environment(&self) -> &FrameworkEnvironment {
        &self.environment
    }

    pub fn configuration(&self) -> Option<&ConfigurationSnapshot> {
        self.configuration.as_ref()
    }

    /// Replaces the stored configuration snapshot. Idempotent; the last snapshot wins.
    pub fn use_configuration(&mut self, snapshot: ConfigurationSnapshot) {
        self.configuration = Some(snapshot);
    }

    /// Replaces the service collection with an externally-owned one, for hosted scenarios
    /// where the host manages service registration.
    pub fn use_hosted_services(
        &mut self,
        services: ServiceCollection,
    ) -> Result<(), FrameworkError> {
        if self.provider.is_some() {
            return Err(FrameworkError::AlreadyBuilt);
        }

        self.services = Some(services);
        Ok(())
    }

    /// Mutable access to the service registrations. Fails once the construction is built.
    pub fn services_mut(&mut self) -> Result<&mut ServiceCollection, FrameworkError> {
        self.services.as_mut().ok_or(FrameworkError::AlreadyBuilt)
    }

    /// Takes the service collection out of the construction, leaving it in the built-like
    /// state where further registration fails. Used by the host adapter to hand the
    /// augmented collection back to the owning host.
    pub fn release_services(&mut self) -> Result<ServiceCollection, FrameworkError> {
        self.services.take().ok_or(FrameworkError::AlreadyBuilt)
    }

    /// Finalizes the registrations into a resolvable provider. Requires a configuration to
    /// have been set; any subsequent build or registration attempt fails with
    /// [AlreadyBuilt](FrameworkError::AlreadyBuilt).
    pub fn build(&mut self) -> Result<Arc<ServiceProvider>, FrameworkError> {
        if self.configuration.is_none() {
            return Err(FrameworkError::MissingConfiguration);
        }

        let services = self.services.take().ok_or(FrameworkError::AlreadyBuilt)?;
        let provider = Arc::new(services.build_provider());
        self.provider = Some(provider.clone());

        info!(
            environment = self.environment.label(),
            "Framework construction built."
        );

        Ok(provider)
    }

    /// Adopts a provider built by an external host, bypassing the local build.
    pub fn adopt_provider(&mut self, provider: Arc<ServiceProvider>) {
        self.services = None;
        self.provider = Some(provider);
    }

    /// The provider produced by [build](Self::build) or adopted from a host.
    pub fn provider(&self) -> Result<&Arc<ServiceProvider>, FrameworkError> {
        self.provider.as_ref().ok_or(FrameworkError::NotBuilt)
    }

    pub fn is_built(&self) -> bool {
        self.provider.is_some()
    }
}

impl Default for FrameworkConstruction {
    fn default() -> Self {
        Self::new()
    }
}
