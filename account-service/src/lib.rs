//! Account service for managing balances and transaction history

pub mod service;
pub mod repository;
pub mod limits;
pub mod config;

pub use service::AccountService;
pub use service::RepositoryType;
pub use repository::{AccountRepository, InMemoryAccountRepository, PostgresAccountRepository};
pub use limits::DailyLimitTracker;
pub use config::AccountServiceConfig;
