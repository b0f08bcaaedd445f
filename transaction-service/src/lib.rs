//! Transaction history projection for accounts

pub mod service;

pub use service::{TransactionService, TransactionView, RECENT_LIMIT};
