use groundwork::config::ConfigurationSnapshot;
use groundwork::error::FrameworkError;
use groundwork::framework::Framework;
use groundwork::host::{use_framework_with, HostBuilder, HostConfigureCallback, HostContext};
use std::sync::Arc;

struct AuditTrail;

// Stands in for an externally-owned hosting pipeline, e.g. a web host with a
// service-configuration hook.
#[derive(Default)]
struct SimulatedHost {
    callback: Option<HostConfigureCallback>,
}

impl HostBuilder for SimulatedHost {
    fn configure_services(&mut self, callback: HostConfigureCallback) {
        self.callback = Some(callback);
    }
}

fn main() -> Result<(), FrameworkError> {
    let mut host = SimulatedHost::default();
    use_framework_with(&mut host, |construction| {
        if let Ok(services) = construction.services_mut() {
            services.register_instance(AuditTrail);
        }
    });

    // the host invokes the registered callback while assembling its services...
    let mut context = HostContext::default();
    if let Some(callback) = host.callback.take() {
        callback(&mut context)?;
    }

    // ...then builds the provider itself and hands it back to the framework
    let provider = Arc::new(context.services.build_provider());
    Framework::adopt_provider(provider)?;

    let snapshot = Framework::service::<ConfigurationSnapshot>()?;
    println!(
        "Hosted configuration resolves the log location: {:?}",
        snapshot.get_string("Logging:LogFileLocation")
    );
    Framework::service::<AuditTrail>()?;
    println!("Hosted service graph is shared with the framework.");

    Ok(())
}
