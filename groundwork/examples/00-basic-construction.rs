use groundwork::construction::FrameworkConstruction;
use groundwork::error::FrameworkError;
use groundwork::framework::Framework;

struct Greeter {
    greeting: String,
}

impl Greeter {
    fn greet(&self, name: &str) -> String {
        format!("{}, {}!", self.greeting, name)
    }
}

// The standalone lifecycle: default configuration and logger, own services, one build,
// then resolution through the facade.
fn main() -> Result<(), FrameworkError> {
    let construction = FrameworkConstruction::with_defaults_customized(|builder| {
        builder
            .set_override("logging.logfilelocation", "logs/00-basic.log")
            .expect("cannot override the log location")
    })?;
    Framework::construct(construction);

    Framework::with_construction(|construction| -> Result<(), FrameworkError> {
        construction.services_mut()?.register_singleton(|_| {
            Ok(Greeter {
                greeting: "Hello".to_string(),
            })
        });
        Ok(())
    })??;

    Framework::build()?;

    let greeter = Framework::service::<Greeter>()?;
    println!("{}", greeter.greet("world"));
    println!("Environment: {}", Framework::environment()?.label());

    Ok(())
}
