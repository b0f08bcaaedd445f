//! Channel registry with default fallback

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use crate::channel::NotificationChannel;
use crate::email::EmailChannel;
use crate::sms::SmsChannel;

/// Sender address used for outgoing messages
const SENDER: &str = "bank";

/// Resolves a channel name to a sender, falling back to the default channel
/// for unrecognized names
pub struct NotificationFactory {
    channels: HashMap<String, Arc<dyn NotificationChannel>>,
    default: Arc<dyn NotificationChannel>,
}

impl NotificationFactory {
    /// Build the standard registry with email as the default channel
    pub fn new() -> Self {
        let email: Arc<dyn NotificationChannel> = Arc::new(EmailChannel::new(SENDER));
        let sms: Arc<dyn NotificationChannel> = Arc::new(SmsChannel::new());

        let mut channels = HashMap::new();
        channels.insert(email.name().to_string(), email.clone());
        channels.insert(sms.name().to_string(), sms);

        Self {
            channels,
            default: email,
        }
    }

    /// Build the standard registry with a different default channel.
    /// Unknown names keep email as the default.
    pub fn with_default(name: &str) -> Self {
        let mut factory = Self::new();
        match factory.channels.get(name) {
            Some(channel) => factory.default = channel.clone(),
            None => warn!("unknown default notification channel {:?}, keeping email", name),
        }
        factory
    }

    /// Look up a channel by name
    pub fn channel(&self, name: &str) -> Option<Arc<dyn NotificationChannel>> {
        self.channels.get(name).cloned()
    }

    /// The system default channel
    pub fn default_channel(&self) -> Arc<dyn NotificationChannel> {
        self.default.clone()
    }

    /// Resolve a preference, falling back to the default for unknown names
    pub fn preferred(&self, name: &str) -> Arc<dyn NotificationChannel> {
        self.channel(name).unwrap_or_else(|| self.default_channel())
    }
}

impl Default for NotificationFactory {
    fn default() -> Self {
        Self::new()
    }
}
