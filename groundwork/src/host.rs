//! Bridges the construction lifecycle into an externally-owned hosting pipeline. The host
//! stays in charge of its own service collection and of building the final provider; the
//! adapter's callback augments that collection with the framework registrations and
//! installs the construction as the active one. The host completes the lifecycle by
//! building the provider from its collection and passing it to
//! [Framework::adopt_provider].

use crate::config::ConfigurationSnapshot;
use crate::construction::FrameworkConstruction;
use crate::error::FrameworkError;
use crate::framework::Framework;
use derive_more::Constructor;
use groundwork_di::collection::ServiceCollection;
#[cfg(test)]
use mockall::automock;
use std::mem;

/// Callback a host invokes while assembling its service collection.
pub type HostConfigureCallback =
    Box<dyn FnOnce(&mut HostContext) -> Result<(), FrameworkError> + Send>;

/// State an external host exposes to service-configuration callbacks: its own service
/// collection and, when available, its own configuration.
#[derive(Constructor, Default)]
pub struct HostContext {
    pub services: ServiceCollection,
    pub configuration: Option<ConfigurationSnapshot>,
}

/// An externally-owned hosting pipeline (e.g. a web host) accepting
/// service-configuration callbacks.
#[cfg_attr(test, automock)]
pub trait HostBuilder {
    /// Registers a callback invoked when the host assembles its service collection.
    fn configure_services(&mut self, callback: HostConfigureCallback);
}

/// Registers the framework lifecycle with the host. See
/// [use_framework_with](use_framework_with) for the callback's behavior.
pub fn use_framework<H: HostBuilder>(host: &mut H) -> &mut H {
    use_framework_with(host, |_| {})
}

/// Registers a callback with the host which, when invoked: constructs a fresh
/// construction and installs it as the active one, adopts the host's service collection,
/// re-runs the configuration assembler and the default registrar against it, layers the
/// host's own configuration as the highest-precedence source, invokes `configure` with the
/// construction, and finally hands the augmented collection back to the host.
pub fn use_framework_with<H, F>(host: &mut H, configure: F) -> &mut H
where
    H: HostBuilder,
    F: FnOnce(&mut FrameworkConstruction) + Send + 'static,
{
    host.configure_services(Box::new(move |context| {
        let mut construction = FrameworkConstruction::new();
        construction.use_hosted_services(mem::take(&mut context.services))?;

        let mut construction = match context.configuration.take() {
            Some(host_configuration) => {
                construction.add_default_configuration_with(move |builder| {
                    builder.add_source(host_configuration.into_config())
                })?
            }
            None => construction.add_default_configuration()?,
        };
        construction = construction.add_default_services()?;

        configure(&mut construction);

        context.services = construction.release_services()?;
        Framework::construct(construction);

        Ok(())
    }));

    host
}
