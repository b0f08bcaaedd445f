// api-gateway/src/lib.rs
pub mod api;
pub mod error;
pub mod config;

use std::sync::Arc;

use account_service::AccountService;
use transaction_service::TransactionService;

/// App state shared across handlers
pub struct AppState {
    /// Account service
    pub account_service: Arc<AccountService>,
    /// Transaction service
    pub transaction_service: Arc<TransactionService>,
}
