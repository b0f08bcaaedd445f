//! Transaction service implementation

use std::sync::Arc;

use account_service::AccountRepository;
use common::decimal::Amount;
use common::error::{Error, Result};
use common::model::account::AccountKey;
use common::model::transaction::Transaction;
use serde::{Deserialize, Serialize};
use tracing::debug;
#[cfg(feature = "utoipa")]
use utoipa::ToSchema;

/// Maximum number of transactions returned per listing
pub const RECENT_LIMIT: usize = 10;

/// Display form of a transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct TransactionView {
    /// Human-readable description of the movement
    pub label: String,
    /// Positive magnitude of the movement
    pub amount: Amount,
}

impl From<&Transaction> for TransactionView {
    fn from(transaction: &Transaction) -> Self {
        Self {
            label: transaction.label.clone(),
            amount: transaction.amount,
        }
    }
}

/// Projects account transaction history into display form
pub struct TransactionService {
    /// Repository for account data, shared with the account service
    repo: Arc<dyn AccountRepository>,
}

impl TransactionService {
    /// Create a new transaction service over the given repository
    pub fn new(repo: Arc<dyn AccountRepository>) -> Self {
        Self { repo }
    }

    /// The most recent transactions of an account, newest first
    ///
    /// Returns at most [`RECENT_LIMIT`] entries as a finite snapshot of the
    /// history at call time.
    pub async fn recent_transactions(&self, key: &AccountKey) -> Result<Vec<TransactionView>> {
        let account = self
            .repo
            .find_account(key)
            .await?
            .ok_or_else(|| Error::AccountNotFound(key.to_string()))?;

        debug!(
            "Listing recent transactions for account {} ({} total)",
            account.id,
            account.transactions.len()
        );

        let views = account
            .transactions
            .iter()
            .rev()
            .take(RECENT_LIMIT)
            .map(TransactionView::from)
            .collect();

        Ok(views)
    }
}
