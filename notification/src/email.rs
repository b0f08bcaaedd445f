//! Email notification channel

use async_trait::async_trait;
use common::error::Result;
use tracing::info;

use crate::channel::NotificationChannel;

/// Email delivery channel
///
/// Delivery is simulated through the log; there is no SMTP integration.
pub struct EmailChannel {
    sender: String,
}

impl EmailChannel {
    /// Create an email channel sending from the given address
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
        }
    }
}

#[async_trait]
impl NotificationChannel for EmailChannel {
    fn name(&self) -> &str {
        "email"
    }

    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<()> {
        info!(
            channel = "email",
            from = %self.sender,
            to = recipient,
            subject,
            "delivering notification: {}",
            body
        );
        Ok(())
    }
}
