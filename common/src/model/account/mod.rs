//! Account model and lookup keys

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::{precision, Amount};
use crate::model::transaction::Transaction;
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Account model
///
/// The account owns its transaction history exclusively: the records live in
/// `transactions` by value, so removing an account removes its transactions
/// and a transaction never outlives its account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct Account {
    /// Unique account id, assigned by the store on creation
    pub id: i64,
    /// Holder first name
    pub first_name: String,
    /// Holder last name, unique across accounts (service-enforced)
    pub last_name: String,
    /// Current balance
    pub balance: Amount,
    /// Preferred notification channel name
    pub notification_preference: String,
    /// Timestamp of the most recent balance-affecting operation
    pub last_updated: DateTime<Utc>,
    /// Transaction history in creation order
    pub transactions: Vec<Transaction>,
}

impl Account {
    /// Create an account shell with a zero balance
    pub fn new(
        id: i64,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        notification_preference: impl Into<String>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            balance: Amount::ZERO,
            notification_preference: notification_preference.into(),
            last_updated: Utc::now(),
            transactions: Vec::new(),
        }
    }

    /// Add funds and stamp the update time
    pub fn credit(&mut self, amount: Amount) {
        self.balance += precision::round_amount(amount);
        self.last_updated = Utc::now();
    }

    /// Remove funds and stamp the update time
    pub fn debit(&mut self, amount: Amount) {
        self.balance -= precision::round_amount(amount);
        self.last_updated = Utc::now();
    }

    /// Append a transaction stamped with the account's update time
    pub fn record(&mut self, label: impl Into<String>, amount: Amount) {
        let transaction = Transaction::new(self.id, label, amount, self.last_updated);
        self.transactions.push(transaction);
    }
}

/// Lookup key forms accepted by account retrieval
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountKey {
    /// Numeric account id
    Id(i64),
    /// Holder first name
    FirstName(String),
    /// Holder last name
    LastName(String),
}

impl fmt::Display for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountKey::Id(id) => write!(f, "id {}", id),
            AccountKey::FirstName(name) => write!(f, "first name {}", name),
            AccountKey::LastName(name) => write!(f, "last name {}", name),
        }
    }
}
