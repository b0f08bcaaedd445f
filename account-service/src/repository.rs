//! Repository for account data

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use common::decimal::Amount;
use common::error::{Error, Result};
use common::model::account::{Account, AccountKey};
use common::model::transaction::Transaction;
use dashmap::DashMap;
use sqlx::{postgres::PgPoolOptions, postgres::PgRow, PgPool, Row};
use tracing::{debug, info};

/// Account repository trait defining the interface for account data storage
///
/// The store is a plain key-value collaborator: it looks accounts up by id
/// or holder name and persists whole account records with an atomic
/// single-row upsert. Last-name uniqueness is enforced by the service
/// layer, not here.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Create and persist a new account with a store-assigned id
    async fn create_account(
        &self,
        first_name: &str,
        last_name: &str,
        notification_preference: &str,
    ) -> Result<Account>;

    /// Find an account by lookup key
    async fn find_account(&self, key: &AccountKey) -> Result<Option<Account>>;

    /// Persist the current state of an account, appending any new
    /// transactions
    async fn update_account(&self, account: &Account) -> Result<()>;
}

/// In-memory repository for account data
pub struct InMemoryAccountRepository {
    /// Accounts by id
    pub accounts: DashMap<i64, Account>,
    /// Next account id to assign
    next_id: AtomicI64,
}

impl InMemoryAccountRepository {
    /// Create a new in-memory account repository
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create_account(
        &self,
        first_name: &str,
        last_name: &str,
        notification_preference: &str,
    ) -> Result<Account> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let account = Account::new(id, first_name, last_name, notification_preference);

        self.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_account(&self, key: &AccountKey) -> Result<Option<Account>> {
        let account = match key {
            AccountKey::Id(id) => self.accounts.get(id).map(|a| a.clone()),
            AccountKey::FirstName(name) => self
                .accounts
                .iter()
                .find(|entry| entry.first_name == *name)
                .map(|entry| entry.value().clone()),
            AccountKey::LastName(name) => self
                .accounts
                .iter()
                .find(|entry| entry.last_name == *name)
                .map(|entry| entry.value().clone()),
        };

        Ok(account)
    }

    async fn update_account(&self, account: &Account) -> Result<()> {
        self.accounts.insert(account.id, account.clone());
        Ok(())
    }
}

/// PostgreSQL repository for account data
///
/// Balances and transaction amounts are stored as text and parsed back into
/// decimals on load. The schema is in `schema.sql` at the crate root.
pub struct PostgresAccountRepository {
    /// Database connection pool
    pool: PgPool,
}

impl PostgresAccountRepository {
    /// Create a new PostgreSQL account repository
    pub async fn new(database_url: Option<String>) -> Result<Self> {
        let url = match database_url {
            Some(url) => url,
            None => std::env::var("DATABASE_URL")
                .map_err(|_| Error::Configuration("DATABASE_URL must be set".to_string()))?,
        };

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await
            .map_err(Error::Database)?;

        info!("Connected to PostgreSQL database");

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL account repository with configuration
    pub async fn with_config(config: &crate::config::AccountServiceConfig) -> Result<Self> {
        info!(
            "Connecting to PostgreSQL database with pool size: {}",
            config.db_pool_size
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.db_pool_size)
            .connect(&config.database_url)
            .await
            .map_err(Error::Database)?;

        info!("Connected to PostgreSQL database");

        Ok(Self { pool })
    }

    /// Build an account from its row plus its transaction rows
    async fn load_account(&self, row: PgRow) -> Result<Account> {
        let id: i64 = row.get("id");
        let balance_str: String = row.get("balance");
        let balance = balance_str
            .parse::<Amount>()
            .map_err(|e| Error::Internal(format!("Invalid balance format: {}", e)))?;

        let mut account = Account {
            id,
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            balance,
            notification_preference: row.get("notification_preference"),
            last_updated: row.get("last_updated"),
            transactions: Vec::new(),
        };

        let rows = sqlx::query(
            "SELECT id, label, amount, created_at FROM transactions
             WHERE account_id = $1
             ORDER BY position",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        for row in rows {
            let amount_str: String = row.get("amount");
            let amount = amount_str
                .parse::<Amount>()
                .map_err(|e| Error::Internal(format!("Invalid amount format: {}", e)))?;

            account.transactions.push(Transaction {
                id: row.get("id"),
                label: row.get("label"),
                amount,
                timestamp: row.get("created_at"),
                account_id: id,
            });
        }

        Ok(account)
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create_account(
        &self,
        first_name: &str,
        last_name: &str,
        notification_preference: &str,
    ) -> Result<Account> {
        debug!("Creating new account in database for {} {}", first_name, last_name);

        let now = Utc::now();
        let row = sqlx::query(
            "INSERT INTO accounts (first_name, last_name, balance, notification_preference, last_updated)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(first_name)
        .bind(last_name)
        .bind(Amount::ZERO.to_string())
        .bind(notification_preference)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = row.get("id");
        let mut account = Account::new(id, first_name, last_name, notification_preference);
        account.last_updated = now;

        Ok(account)
    }

    async fn find_account(&self, key: &AccountKey) -> Result<Option<Account>> {
        debug!("Getting account from database: {}", key);

        let columns =
            "id, first_name, last_name, balance, notification_preference, last_updated";
        let row = match key {
            AccountKey::Id(id) => {
                sqlx::query(&format!("SELECT {} FROM accounts WHERE id = $1", columns))
                    .bind(*id)
                    .fetch_optional(&self.pool)
                    .await?
            }
            AccountKey::FirstName(name) => sqlx::query(&format!(
                "SELECT {} FROM accounts WHERE first_name = $1 LIMIT 1",
                columns
            ))
            .bind(name)
            .fetch_optional(&self.pool)
            .await?,
            AccountKey::LastName(name) => sqlx::query(&format!(
                "SELECT {} FROM accounts WHERE last_name = $1 LIMIT 1",
                columns
            ))
            .bind(name)
            .fetch_optional(&self.pool)
            .await?,
        };

        match row {
            Some(row) => Ok(Some(self.load_account(row).await?)),
            None => Ok(None),
        }
    }

    async fn update_account(&self, account: &Account) -> Result<()> {
        debug!("Updating account in database: {}", account.id);

        let result = sqlx::query(
            "INSERT INTO accounts (id, first_name, last_name, balance, notification_preference, last_updated)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (id)
             DO UPDATE SET
                first_name = $2,
                last_name = $3,
                balance = $4,
                notification_preference = $5,
                last_updated = $6",
        )
        .bind(account.id)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(account.balance.to_string())
        .bind(&account.notification_preference)
        .bind(account.last_updated)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::Internal(format!(
                "Failed to update account: {}",
                account.id
            )));
        }

        // Transactions are append-only; re-inserting existing records is a
        // no-op keyed on the transaction id.
        for transaction in &account.transactions {
            sqlx::query(
                "INSERT INTO transactions (id, account_id, label, amount, created_at)
                 VALUES ($1, $2, $3, $4, $5)
                 ON CONFLICT (id) DO NOTHING",
            )
            .bind(transaction.id)
            .bind(transaction.account_id)
            .bind(&transaction.label)
            .bind(transaction.amount.to_string())
            .bind(transaction.timestamp)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }
}
