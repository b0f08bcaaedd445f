//! Decimal type utilities for precise monetary calculations

use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;

/// Monetary amount with high precision
pub type Amount = Decimal;

/// Precision helpers for common operations
pub mod precision {
    use super::*;

    /// Default monetary precision (2 decimal places)
    pub const AMOUNT_PRECISION: u32 = 2;

    /// Round an amount to standard monetary precision
    pub fn round_amount(amount: Amount) -> Amount {
        amount.round_dp(AMOUNT_PRECISION)
    }
}
