//! Account service implementation
//!
//! The sole authority for balance mutation and the only component enforcing
//! the daily deposit limit. Every mutating operation (balance change +
//! transaction append + persist) runs under a per-account lock; a wire
//! transfer holds both account locks, acquired in ascending id order.

use std::sync::Arc;

use common::decimal::Amount;
use common::error::{Error, Result};
use common::model::account::{Account, AccountKey};
use dashmap::DashMap;
use notification::NotificationFactory;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::limits::DailyLimitTracker;
use crate::repository::{AccountRepository, InMemoryAccountRepository, PostgresAccountRepository};

/// Account service for managing balances and transaction history
pub struct AccountService {
    /// Repository for account data
    repo: Arc<dyn AccountRepository>,
    /// Notification channel registry
    notifications: Arc<NotificationFactory>,
    /// Daily deposit window state
    limits: DailyLimitTracker,
    /// Per-account mutation locks
    locks: DashMap<i64, Arc<Mutex<()>>>,
}

/// Repository Type
pub enum RepositoryType {
    /// In-memory repository
    InMemory,
    /// PostgreSQL repository
    Postgres(Option<String>),
}

impl AccountService {
    /// Create a new account service backed by the in-memory repository
    pub fn new() -> Self {
        Self::assemble(
            Arc::new(InMemoryAccountRepository::new()),
            Arc::new(NotificationFactory::new()),
            DailyLimitTracker::default(),
        )
    }

    /// Create a new account service with a specific repository type
    pub async fn with_repository(repo_type: RepositoryType) -> Result<Self> {
        let repo: Arc<dyn AccountRepository> = match repo_type {
            RepositoryType::InMemory => Arc::new(InMemoryAccountRepository::new()),
            RepositoryType::Postgres(database_url) => {
                Arc::new(PostgresAccountRepository::new(database_url).await?)
            }
        };

        Ok(Self::assemble(
            repo,
            Arc::new(NotificationFactory::new()),
            DailyLimitTracker::default(),
        ))
    }

    /// Create a new account service with a configuration
    pub async fn with_config(config: &crate::config::AccountServiceConfig) -> Result<Self> {
        let repo: Arc<dyn AccountRepository> =
            Arc::new(PostgresAccountRepository::with_config(config).await?);

        Ok(Self::assemble(
            repo,
            Arc::new(NotificationFactory::with_default(&config.default_channel)),
            DailyLimitTracker::new(config.daily_deposit_cap),
        ))
    }

    /// Create an in-memory service with a custom deposit window tracker
    pub fn with_limits(limits: DailyLimitTracker) -> Self {
        Self::assemble(
            Arc::new(InMemoryAccountRepository::new()),
            Arc::new(NotificationFactory::new()),
            limits,
        )
    }

    fn assemble(
        repo: Arc<dyn AccountRepository>,
        notifications: Arc<NotificationFactory>,
        limits: DailyLimitTracker,
    ) -> Self {
        Self {
            repo,
            notifications,
            limits,
            locks: DashMap::new(),
        }
    }

    /// The underlying repository, shared with the transaction service
    pub fn repository(&self) -> Arc<dyn AccountRepository> {
        self.repo.clone()
    }

    /// The daily deposit window tracker
    pub fn limits(&self) -> &DailyLimitTracker {
        &self.limits
    }

    /// The mutation lock for one account
    fn lock_for(&self, id: i64) -> Arc<Mutex<()>> {
        self.locks
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Create a new account and send the welcome notification
    ///
    /// The notification is fire-and-forget: a delivery failure is logged
    /// and never rolls back the created account.
    pub async fn create_account(&self, first_name: &str, last_name: &str) -> Result<Account> {
        if first_name.trim().is_empty() {
            return Err(Error::Validation("first name must not be empty".to_string()));
        }
        if last_name.trim().is_empty() {
            return Err(Error::Validation("last name must not be empty".to_string()));
        }

        if self
            .repo
            .find_account(&AccountKey::LastName(last_name.to_string()))
            .await?
            .is_some()
        {
            return Err(Error::LastNameExists(last_name.to_string()));
        }

        let default_channel = self.notifications.default_channel();
        let account = self
            .repo
            .create_account(first_name, last_name, default_channel.name())
            .await?;

        info!("Created account {} for {} {}", account.id, first_name, last_name);

        let channel = self.notifications.preferred(&account.notification_preference);
        let recipient = account.last_name.clone();
        tokio::spawn(async move {
            if let Err(e) = channel
                .send(&recipient, "Account Created", "Welcome aboard!")
                .await
            {
                warn!("welcome notification for {} failed: {}", recipient, e);
            }
        });

        Ok(account)
    }

    /// Get an account by lookup key
    pub async fn get_account(&self, key: &AccountKey) -> Result<Account> {
        self.repo
            .find_account(key)
            .await?
            .ok_or_else(|| Error::AccountNotFound(key.to_string()))
    }

    /// Deposit funds into an account, subject to the daily deposit window
    pub async fn deposit(&self, account_id: i64, amount: Amount) -> Result<Account> {
        info!("Depositing {} to account {}", amount, account_id);

        let lock = self.lock_for(account_id);
        let _guard = lock.lock().await;

        let mut account = self.get_account(&AccountKey::Id(account_id)).await?;

        self.limits.reserve(account.last_updated, amount).await?;

        account.credit(amount);
        account.record(format!("Deposit of {}$", amount), amount);

        if let Err(e) = self.repo.update_account(&account).await {
            self.limits.release(amount).await;
            return Err(e);
        }

        Ok(account)
    }

    /// Withdraw funds from an account
    pub async fn withdraw(&self, account_id: i64, amount: Amount) -> Result<Account> {
        info!("Withdrawing {} from account {}", amount, account_id);

        let lock = self.lock_for(account_id);
        let _guard = lock.lock().await;

        let mut account = self.get_account(&AccountKey::Id(account_id)).await?;
        self.debit_into(&mut account, amount, format!("Withdrawal of {}$", amount))?;
        self.repo.update_account(&account).await?;

        Ok(account)
    }

    /// Move funds between two accounts
    ///
    /// The debit leg validates like a plain withdrawal; the credit leg
    /// bypasses the daily deposit window and cap. If the credit cannot be
    /// persisted after the debit committed, a reversing credit is applied
    /// to the source before the error is surfaced.
    pub async fn wire_transfer(&self, from_id: i64, to_id: i64, amount: Amount) -> Result<()> {
        info!("Wire transfer of {} from account {} to account {}", amount, from_id, to_id);

        if from_id == to_id {
            return Err(Error::Validation(
                "transfer source and destination must differ".to_string(),
            ));
        }

        // Both locks, ascending id order.
        let (low, high) = if from_id < to_id {
            (from_id, to_id)
        } else {
            (to_id, from_id)
        };
        let low_lock = self.lock_for(low);
        let high_lock = self.lock_for(high);
        let _low_guard = low_lock.lock().await;
        let _high_guard = high_lock.lock().await;

        // Load both sides before mutating either, so a missing account
        // fails the whole operation with no side effects.
        let mut source = self.get_account(&AccountKey::Id(from_id)).await?;
        let mut dest = self.get_account(&AccountKey::Id(to_id)).await?;

        self.debit_into(
            &mut source,
            amount,
            format!("Wire transfer of {}$ sent to {}", amount, dest.first_name),
        )?;
        self.repo.update_account(&source).await?;

        dest.credit(amount);
        dest.record(
            format!("Wire transfer of {}$ received from {}", amount, source.first_name),
            amount,
        );

        if let Err(e) = self.repo.update_account(&dest).await {
            // Compensate the committed debit before surfacing the error.
            source.credit(amount);
            source.record(format!("Wire transfer reversal of {}$", amount), amount);
            if let Err(reversal) = self.repo.update_account(&source).await {
                error!(
                    "failed to reverse debit of {} on account {}: {}",
                    amount, from_id, reversal
                );
                return Err(Error::TransferInconsistency(format!(
                    "debit of {} from account {} could not be reversed: {}",
                    amount, from_id, reversal
                )));
            }
            return Err(e);
        }

        Ok(())
    }

    /// Validate and apply a debit to a loaded account
    ///
    /// The solvency gate checks the pre-withdrawal balance only, not
    /// whether it covers the amount.
    fn debit_into(&self, account: &mut Account, amount: Amount, label: String) -> Result<()> {
        if amount <= Amount::ZERO {
            return Err(Error::InvalidAmount(format!(
                "withdrawal amount must be positive, got {}",
                amount
            )));
        }
        if account.balance <= Amount::ZERO {
            return Err(Error::InsufficientFunds(format!(
                "account {} has no funds to draw on",
                account.id
            )));
        }

        account.debit(amount);
        account.record(label, amount);
        Ok(())
    }
}

impl Default for AccountService {
    fn default() -> Self {
        Self::new()
    }
}
