//! Facade lifecycle tests. The active construction is process-wide state, so every test
//! here installs its own construction and the tests are serialized with a mutex.

use config::Config;
use groundwork::config::ConfigurationSnapshot;
use groundwork::construction::FrameworkConstruction;
use groundwork::error::FrameworkError;
use groundwork::framework::Framework;
use std::sync::{Mutex, PoisonError};

static SERIAL: Mutex<()> = Mutex::new(());

#[derive(Debug)]
struct FirstService;
struct SecondService;

fn empty_snapshot() -> ConfigurationSnapshot {
    ConfigurationSnapshot::from_config(Config::builder().build().unwrap())
}

#[test]
fn should_build_and_resolve_through_the_facade() {
    let _serial = SERIAL.lock().unwrap_or_else(PoisonError::into_inner);

    let construction = FrameworkConstruction::new()
        .add_configuration(empty_snapshot())
        .unwrap();
    Framework::construct(construction);

    Framework::with_construction(|construction| {
        construction
            .services_mut()
            .map(|services| {
                services.register_singleton(|_| Ok(FirstService));
            })
            .unwrap();
    })
    .unwrap();

    Framework::build().unwrap();

    assert!(Framework::service::<FirstService>().is_ok());
    assert_eq!(
        Framework::environment().unwrap().label(),
        Framework::with_construction(|construction| construction.environment().label()).unwrap()
    );
}

#[test]
fn construct_should_replace_the_active_construction() {
    let _serial = SERIAL.lock().unwrap_or_else(PoisonError::into_inner);

    let mut first = FrameworkConstruction::new()
        .add_configuration(empty_snapshot())
        .unwrap();
    first
        .services_mut()
        .unwrap()
        .register_singleton(|_| Ok(FirstService));
    Framework::construct(first);
    Framework::build().unwrap();
    assert!(Framework::service::<FirstService>().is_ok());

    let mut second = FrameworkConstruction::new()
        .add_configuration(empty_snapshot())
        .unwrap();
    second
        .services_mut()
        .unwrap()
        .register_singleton(|_| Ok(SecondService));
    Framework::construct(second);
    Framework::build().unwrap();

    assert!(Framework::service::<SecondService>().is_ok());
    assert!(matches!(
        Framework::service::<FirstService>().unwrap_err(),
        FrameworkError::Resolution(_)
    ));
}

#[test]
fn service_should_fail_before_the_construction_is_built() {
    let _serial = SERIAL.lock().unwrap_or_else(PoisonError::into_inner);

    Framework::construct(FrameworkConstruction::new());

    assert!(matches!(
        Framework::service::<FirstService>().unwrap_err(),
        FrameworkError::NotBuilt
    ));
    assert!(matches!(
        Framework::build().unwrap_err(),
        FrameworkError::MissingConfiguration
    ));
}
