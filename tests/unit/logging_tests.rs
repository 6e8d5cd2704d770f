// Logging tests

use mockup_forge::logging::{init_subscriber, LogFormat};

#[test]
fn test_can_initialize_tracing_subscriber_twice() {
    let first = init_subscriber(LogFormat::Pretty);
    assert!(first.is_ok(), "first init failed: {:?}", first.err());

    // A second call keeps the installed subscriber instead of failing
    let second = init_subscriber(LogFormat::Json);
    assert!(second.is_ok(), "second init failed: {:?}", second.err());

    tracing::info!(domain = "shop.test", processed = 3, "structured event");
}
