use notification::{NotificationChannel, NotificationFactory};

#[test]
fn test_default_channel_is_email() {
    let factory = NotificationFactory::new();
    assert_eq!(factory.default_channel().name(), "email");
}

#[test]
fn test_unknown_preference_falls_back_to_default() {
    let factory = NotificationFactory::new();
    let channel = factory.preferred("carrier-pigeon");
    assert_eq!(channel.name(), "email");
}

#[test]
fn test_known_preference_resolves() {
    let factory = NotificationFactory::new();
    let channel = factory.preferred("sms");
    assert_eq!(channel.name(), "sms");
}

#[test]
fn test_with_default_switches_channel() {
    let factory = NotificationFactory::with_default("sms");
    assert_eq!(factory.default_channel().name(), "sms");

    // Unknown names keep email as the default
    let factory = NotificationFactory::with_default("carrier-pigeon");
    assert_eq!(factory.default_channel().name(), "email");
}

#[tokio::test]
async fn test_send_is_best_effort_ok() {
    let factory = NotificationFactory::new();
    let channel = factory.default_channel();

    let result = channel.send("Scott", "Account Created", "Welcome aboard!").await;
    assert!(result.is_ok());
}
