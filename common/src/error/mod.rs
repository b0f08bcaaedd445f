//! Error types for the banking services
//!
//! This module provides a unified error handling system for all service
//! crates in the banking back-end. It defines standard error types that can
//! be used across service boundaries and provides consistent error
//! conversion.

use std::fmt::Display;
use thiserror::Error;

/// Banking service error type
#[derive(Debug, Error)]
pub enum Error {
    /// Error when an account cannot be found
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Error when an account with the requested last name already exists
    #[error("Last name already taken: {0}")]
    LastNameExists(String),

    /// Error when a deposit or withdrawal amount is not strictly positive
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Error when an account has insufficient funds for a withdrawal
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),

    /// Error when a deposit would exceed the daily deposit cap
    #[error("Daily deposit limit exceeded: {0}")]
    DepositLimitExceeded(String),

    /// Error when an account's last activity falls outside the tracked
    /// deposit window
    #[error("Deposit window invalid: {0}")]
    DepositWindowInvalid(String),

    /// Error when a wire transfer left the two accounts in an inconsistent
    /// state that could not be compensated
    #[error("Transfer inconsistency: {0}")]
    TransferInconsistency(String),

    /// Generic validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait to add context to error results
pub trait ErrorExt<T> {
    /// Add context information to an error
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display;
}

impl<T> ErrorExt<T> for Result<T> {
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display,
    {
        self.map_err(|e| {
            let context = context_fn().to_string();
            match e {
                Error::AccountNotFound(msg) => Error::AccountNotFound(format!("{}: {}", context, msg)),
                Error::LastNameExists(msg) => Error::LastNameExists(format!("{}: {}", context, msg)),
                Error::InvalidAmount(msg) => Error::InvalidAmount(format!("{}: {}", context, msg)),
                Error::InsufficientFunds(msg) => Error::InsufficientFunds(format!("{}: {}", context, msg)),
                Error::DepositLimitExceeded(msg) => Error::DepositLimitExceeded(format!("{}: {}", context, msg)),
                Error::DepositWindowInvalid(msg) => Error::DepositWindowInvalid(format!("{}: {}", context, msg)),
                Error::TransferInconsistency(msg) => Error::TransferInconsistency(format!("{}: {}", context, msg)),
                Error::Validation(msg) => Error::Validation(format!("{}: {}", context, msg)),
                Error::Configuration(msg) => Error::Configuration(format!("{}: {}", context, msg)),
                Error::Internal(msg) => Error::Internal(format!("{}: {}", context, msg)),
                Error::Database(e) => Error::Database(e),
            }
        })
    }
}

/// Convert string messages into an error
impl From<String> for Error {
    fn from(message: String) -> Self {
        Error::Internal(message)
    }
}

/// Convert static string references into an error
impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Error::Internal(message.to_string())
    }
}
