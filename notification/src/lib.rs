//! Notification dispatch for account events
//!
//! Resolves a named channel to a sender capability. Delivery is best-effort:
//! callers treat failures as non-fatal and the account service never rolls
//! back on a failed send.

pub mod channel;
pub mod email;
pub mod factory;
pub mod sms;

pub use channel::NotificationChannel;
pub use email::EmailChannel;
pub use factory::NotificationFactory;
pub use sms::SmsChannel;
