//! Daily deposit limit tracking
//!
//! The tracker owns the deposit window state shared by all accounts. It is
//! created and owned by an `AccountService` instance, and every
//! read-compare-update of the remaining cap happens under a single mutex.

use chrono::{DateTime, Duration, Local, NaiveTime, TimeZone, Utc};
use common::decimal::{dec, Amount};
use common::error::{Error, Result};
use tokio::sync::Mutex;

/// Default daily deposit cap in currency units
pub const DEFAULT_DAILY_CAP: Amount = dec!(5000);

/// Mutable window state guarded by the tracker mutex
#[derive(Debug)]
struct Window {
    /// Start of the tracked calendar day
    start: DateTime<Utc>,
    /// End of the tracked calendar day (23:59:59 local)
    end: DateTime<Utc>,
    /// Configured cap, restored on every roll
    cap: Amount,
    /// Cap still available in the current window
    remaining: Amount,
    /// Total accepted so far in the current window
    deposited: Amount,
}

impl Window {
    fn new(start: DateTime<Utc>, end: DateTime<Utc>, cap: Amount) -> Self {
        Self {
            start,
            end,
            cap,
            remaining: cap,
            deposited: Amount::ZERO,
        }
    }

    /// Advance both bounds by one day and reset the counters
    fn roll(&mut self) {
        self.start += Duration::days(1);
        self.end += Duration::days(1);
        self.remaining = self.cap;
        self.deposited = Amount::ZERO;
    }

    /// Validate the amount against the remaining cap and consume it
    fn take(&mut self, amount: Amount) -> Result<()> {
        if amount <= Amount::ZERO {
            return Err(Error::InvalidAmount(format!(
                "deposit amount must be positive, got {}",
                amount
            )));
        }
        if self.remaining - amount < Amount::ZERO {
            return Err(Error::DepositLimitExceeded(format!(
                "deposit of {} exceeds the remaining daily cap of {}",
                amount, self.remaining
            )));
        }

        self.remaining -= amount;
        self.deposited += amount;
        Ok(())
    }
}

/// Bounds of the current local calendar day, as UTC instants
fn current_day_bounds() -> (DateTime<Utc>, DateTime<Utc>) {
    let now = Local::now();
    let midnight = now.date_naive().and_time(NaiveTime::MIN);
    // A DST jump can leave local midnight without a single valid instant.
    let start = Local
        .from_local_datetime(&midnight)
        .earliest()
        .unwrap_or(now)
        .with_timezone(&Utc);
    let end = start + Duration::days(1) - Duration::seconds(1);
    (start, end)
}

/// Tracks the rolling daily deposit window shared by all accounts
pub struct DailyLimitTracker {
    state: Mutex<Window>,
}

impl DailyLimitTracker {
    /// Create a tracker over the current local calendar day
    pub fn new(cap: Amount) -> Self {
        let (start, end) = current_day_bounds();
        Self {
            state: Mutex::new(Window::new(start, end, cap)),
        }
    }

    /// Create a tracker over an explicit window
    pub fn with_window(start: DateTime<Utc>, end: DateTime<Utc>, cap: Amount) -> Self {
        Self {
            state: Mutex::new(Window::new(start, end, cap)),
        }
    }

    /// Evaluate the deposit window state machine and reserve `amount` from
    /// the cap.
    ///
    /// When the window has expired it is rolled forward by one day and the
    /// counters reset before the reservation. Otherwise the account's last
    /// activity must fall strictly inside the window and the running total
    /// must not already exceed the cap, or the deposit is rejected as
    /// outside the tracked window.
    pub async fn reserve(&self, last_updated: DateTime<Utc>, amount: Amount) -> Result<()> {
        let mut window = self.state.lock().await;
        let now = Utc::now();

        if now >= window.end {
            window.roll();
            window.take(amount)
        } else if last_updated > window.start
            && last_updated < window.end
            && window.deposited <= window.cap
        {
            window.take(amount)
        } else {
            Err(Error::DepositWindowInvalid(format!(
                "last account activity at {} is outside the window [{}, {}]",
                last_updated, window.start, window.end
            )))
        }
    }

    /// Return a reservation to the cap after a failed persist
    pub async fn release(&self, amount: Amount) {
        let mut window = self.state.lock().await;
        window.remaining += amount;
        window.deposited -= amount;
    }

    /// Cap still available in the current window
    pub async fn remaining(&self) -> Amount {
        self.state.lock().await.remaining
    }

    /// Total accepted so far in the current window
    pub async fn deposited(&self) -> Amount {
        self.state.lock().await.deposited
    }
}

impl Default for DailyLimitTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DAILY_CAP)
    }
}
