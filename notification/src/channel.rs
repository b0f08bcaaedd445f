//! Notification channel abstraction

use async_trait::async_trait;
use common::error::Result;

/// A named capability for delivering messages to an account holder
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Channel name as stored in account preferences
    fn name(&self) -> &str;

    /// Deliver a message to the recipient
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<()>;
}
