//! SMS notification channel

use async_trait::async_trait;
use common::error::Result;
use tracing::info;

use crate::channel::NotificationChannel;

/// SMS delivery channel, simulated through the log
pub struct SmsChannel;

impl SmsChannel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SmsChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationChannel for SmsChannel {
    fn name(&self) -> &str {
        "sms"
    }

    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<()> {
        info!(
            channel = "sms",
            to = recipient,
            subject,
            "delivering notification: {}",
            body
        );
        Ok(())
    }
}
