use groundwork_di::collection::ServiceCollection;
use groundwork_di::error::ErrorPtr;
use std::sync::Arc;
use std::thread;

struct Settings {
    greeting: String,
}

struct Greeter {
    settings: Arc<Settings>,
}

impl Greeter {
    fn greet(&self, name: &str) -> String {
        format!("{}, {}!", self.settings.greeting, name)
    }
}

#[test]
fn should_resolve_a_dependency_graph() {
    let mut collection = ServiceCollection::new();
    collection
        .register_instance(Settings {
            greeting: "Hello".to_string(),
        })
        .register_singleton(|provider| {
            provider
                .get::<Settings>()
                .map(|settings| Greeter { settings })
                .map_err(|error| Arc::new(error) as ErrorPtr)
        });

    let provider = collection.build_provider();
    let greeter = provider.get::<Greeter>().unwrap();

    assert_eq!(greeter.greet("world"), "Hello, world!");
    assert!(provider.contains::<Settings>());
    assert!(!provider.contains::<i32>());
}

#[test]
fn shadowing_registration_should_replace_lifetime_and_factory() {
    let mut collection = ServiceCollection::new();
    collection
        .register_singleton::<String, _>(|_| Ok("singleton".to_string()))
        .register_transient::<String, _>(|_| Ok("transient".to_string()));

    let provider = collection.build_provider();
    let first = provider.get::<String>().unwrap();
    let second = provider.get::<String>().unwrap();

    assert_eq!(*first, "transient");
    assert!(!Arc::ptr_eq(&first, &second));
}

#[test]
fn provider_should_be_shareable_between_threads() {
    let mut collection = ServiceCollection::new();
    collection.register_singleton(|_| {
        Ok(Settings {
            greeting: "Hi".to_string(),
        })
    });

    let provider = Arc::new(collection.build_provider());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let provider = provider.clone();
            thread::spawn(move || provider.get::<Settings>().unwrap())
        })
        .collect();

    let instances: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    for instance in &instances[1..] {
        assert!(Arc::ptr_eq(&instances[0], instance));
    }
}
