//! Transaction records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Amount;
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// An immutable record of a single balance-affecting event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct Transaction {
    /// Unique transaction id, assigned at construction
    pub id: Uuid,
    /// Human-readable description of the movement
    pub label: String,
    /// Positive magnitude of the movement
    pub amount: Amount,
    /// Copied from the owning account's update time at construction
    pub timestamp: DateTime<Utc>,
    /// Owning account id
    pub account_id: i64,
}

impl Transaction {
    /// Create a new transaction for the given account
    pub fn new(
        account_id: i64,
        label: impl Into<String>,
        amount: Amount,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            amount,
            timestamp,
            account_id,
        }
    }
}
