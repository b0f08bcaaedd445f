use account_service::{AccountService, DailyLimitTracker};
use chrono::{Duration, Utc};
use common::decimal::{dec, Amount};
use common::error::Error;
use common::model::account::AccountKey;

#[tokio::test]
async fn test_create_account_starts_empty() {
    let service = AccountService::new();
    let account = service.create_account("Ben", "Scott").await.unwrap();

    assert!(account.id > 0);
    assert_eq!(account.first_name, "Ben");
    assert_eq!(account.last_name, "Scott");
    assert_eq!(account.balance, Amount::ZERO);
    assert_eq!(account.notification_preference, "email");
    assert!(account.transactions.is_empty());
}

#[tokio::test]
async fn test_create_account_rejects_duplicate_last_name() {
    let service = AccountService::new();
    service.create_account("Ben", "Scott").await.unwrap();

    let result = service.create_account("Bill", "Scott").await;
    match result {
        Err(Error::LastNameExists(_)) => (),
        other => panic!("Expected LastNameExists error, got {:?}", other.map(|a| a.id)),
    }

    // The first account is unaffected
    let account = service
        .get_account(&AccountKey::LastName("Scott".to_string()))
        .await
        .unwrap();
    assert_eq!(account.first_name, "Ben");
}

#[tokio::test]
async fn test_create_account_rejects_blank_names() {
    let service = AccountService::new();

    assert!(matches!(
        service.create_account("", "Scott").await,
        Err(Error::Validation(_))
    ));
    assert!(matches!(
        service.create_account("Ben", "  ").await,
        Err(Error::Validation(_))
    ));
}

#[tokio::test]
async fn test_get_account_by_each_key() {
    let service = AccountService::new();
    let created = service.create_account("Ben", "Scott").await.unwrap();

    let by_id = service.get_account(&AccountKey::Id(created.id)).await.unwrap();
    assert_eq!(by_id.id, created.id);

    let by_first = service
        .get_account(&AccountKey::FirstName("Ben".to_string()))
        .await
        .unwrap();
    assert_eq!(by_first.id, created.id);

    let by_last = service
        .get_account(&AccountKey::LastName("Scott".to_string()))
        .await
        .unwrap();
    assert_eq!(by_last.id, created.id);

    let missing = service.get_account(&AccountKey::Id(999)).await;
    assert!(matches!(missing, Err(Error::AccountNotFound(_))));
}

#[tokio::test]
async fn test_deposit_adds_to_balance() {
    let service = AccountService::new();
    let account = service.create_account("Ben", "Scott").await.unwrap();

    let account = service.deposit(account.id, dec!(2000)).await.unwrap();
    assert_eq!(account.balance, dec!(2000));
    assert_eq!(account.transactions.len(), 1);
    assert_eq!(account.transactions[0].label, "Deposit of 2000$");
    assert_eq!(account.transactions[0].amount, dec!(2000));

    let account = service.deposit(account.id, dec!(500)).await.unwrap();
    assert_eq!(account.balance, dec!(2500));
    assert_eq!(account.transactions.len(), 2);
}

#[tokio::test]
async fn test_deposit_rejects_non_positive_amount() {
    let service = AccountService::new();
    let account = service.create_account("Ben", "Scott").await.unwrap();

    for amount in [Amount::ZERO, dec!(-5)] {
        let result = service.deposit(account.id, amount).await;
        assert!(matches!(result, Err(Error::InvalidAmount(_))));
    }

    // No state change
    let account = service.get_account(&AccountKey::Id(account.id)).await.unwrap();
    assert_eq!(account.balance, Amount::ZERO);
    assert!(account.transactions.is_empty());
}

#[tokio::test]
async fn test_deposit_enforces_daily_cap() {
    let service = AccountService::new();
    let account = service.create_account("Ben", "Scott").await.unwrap();

    service.deposit(account.id, dec!(2500)).await.unwrap();
    let account = service.deposit(account.id, dec!(2500)).await.unwrap();
    assert_eq!(account.balance, dec!(5000));

    let result = service.deposit(account.id, dec!(1)).await;
    assert!(matches!(result, Err(Error::DepositLimitExceeded(_))));

    // The rejected deposit left no trace
    let account = service.get_account(&AccountKey::Id(account.id)).await.unwrap();
    assert_eq!(account.balance, dec!(5000));
    assert_eq!(account.transactions.len(), 2);
}

#[tokio::test]
async fn test_daily_cap_is_shared_across_accounts() {
    let service = AccountService::new();
    let first = service.create_account("Ben", "Scott").await.unwrap();
    let second = service.create_account("Bill", "Jones").await.unwrap();

    service.deposit(first.id, dec!(3000)).await.unwrap();
    service.deposit(second.id, dec!(2000)).await.unwrap();

    let result = service.deposit(second.id, dec!(1)).await;
    assert!(matches!(result, Err(Error::DepositLimitExceeded(_))));
}

#[tokio::test]
async fn test_deposit_rolls_expired_window() {
    let start = Utc::now() - Duration::hours(36);
    let end = start + Duration::hours(24);
    let service = AccountService::with_limits(DailyLimitTracker::with_window(start, end, dec!(5000)));

    let account = service.create_account("Ben", "Scott").await.unwrap();
    let account = service.deposit(account.id, dec!(100)).await.unwrap();

    assert_eq!(account.balance, dec!(100));
    assert_eq!(service.limits().deposited().await, dec!(100));
    assert_eq!(service.limits().remaining().await, dec!(4900));
}

#[tokio::test]
async fn test_deposit_rejects_stale_account_clock() {
    let service = AccountService::new();
    let account = service.create_account("Ben", "Scott").await.unwrap();

    let mut stale = service.get_account(&AccountKey::Id(account.id)).await.unwrap();
    stale.last_updated = Utc::now() - Duration::days(3);
    service.repository().update_account(&stale).await.unwrap();

    let result = service.deposit(account.id, dec!(100)).await;
    assert!(matches!(result, Err(Error::DepositWindowInvalid(_))));
}

#[tokio::test]
async fn test_withdraw_subtracts_from_balance() {
    let service = AccountService::new();
    let account = service.create_account("Ben", "Scott").await.unwrap();
    service.deposit(account.id, dec!(2500)).await.unwrap();

    let account = service.withdraw(account.id, dec!(2000)).await.unwrap();
    assert_eq!(account.balance, dec!(500));
    assert_eq!(account.transactions.len(), 2);
    assert_eq!(account.transactions[1].label, "Withdrawal of 2000$");
}

#[tokio::test]
async fn test_withdraw_rejects_non_positive_amount() {
    let service = AccountService::new();
    let account = service.create_account("Ben", "Scott").await.unwrap();
    service.deposit(account.id, dec!(100)).await.unwrap();

    let result = service.withdraw(account.id, dec!(-2000)).await;
    assert!(matches!(result, Err(Error::InvalidAmount(_))));
}

#[tokio::test]
async fn test_withdraw_requires_positive_balance() {
    let service = AccountService::new();
    let account = service.create_account("Ben", "Scott").await.unwrap();

    // Balance is zero: any withdrawal amount is refused
    for amount in [dec!(1), dec!(10000)] {
        let result = service.withdraw(account.id, amount).await;
        assert!(matches!(result, Err(Error::InsufficientFunds(_))));
    }
}

// Known gap: the solvency gate only checks that the pre-withdrawal balance
// is positive, so a positive account can be overdrawn past zero.
#[tokio::test]
async fn test_withdraw_overdraws_positive_balance() {
    let service = AccountService::new();
    let account = service.create_account("Ben", "Scott").await.unwrap();
    service.deposit(account.id, dec!(2000)).await.unwrap();

    let account = service.withdraw(account.id, dec!(5000)).await.unwrap();
    assert_eq!(account.balance, dec!(-3000));
}

#[tokio::test]
async fn test_deposit_then_full_withdrawal() {
    let service = AccountService::new();
    let account = service.create_account("Ben", "Scott").await.unwrap();
    assert_eq!(account.balance, Amount::ZERO);

    let account = service.deposit(account.id, dec!(2000)).await.unwrap();
    assert_eq!(account.balance, dec!(2000));

    // The pre-withdrawal balance is positive, so draining it succeeds
    let account = service.withdraw(account.id, dec!(2000)).await.unwrap();
    assert_eq!(account.balance, Amount::ZERO);

    // A further withdrawal is refused
    let result = service.withdraw(account.id, dec!(1)).await;
    assert!(matches!(result, Err(Error::InsufficientFunds(_))));
}

#[tokio::test]
async fn test_wire_transfer_moves_funds() {
    let service = AccountService::new();
    let sender = service.create_account("Ben", "Scott").await.unwrap();
    let receiver = service.create_account("Bill", "Jones").await.unwrap();

    service.deposit(sender.id, dec!(2500)).await.unwrap();
    service.deposit(receiver.id, dec!(2500)).await.unwrap();

    service.wire_transfer(sender.id, receiver.id, dec!(500)).await.unwrap();

    let sender = service.get_account(&AccountKey::Id(sender.id)).await.unwrap();
    let receiver = service.get_account(&AccountKey::Id(receiver.id)).await.unwrap();

    assert_eq!(sender.balance, dec!(2000));
    assert_eq!(receiver.balance, dec!(3000));

    // Each side records its own leg, labeled with the counterparty
    assert_eq!(
        sender.transactions.last().unwrap().label,
        "Wire transfer of 500$ sent to Bill"
    );
    assert_eq!(
        receiver.transactions.last().unwrap().label,
        "Wire transfer of 500$ received from Ben"
    );
}

#[tokio::test]
async fn test_wire_transfer_missing_destination_has_no_side_effects() {
    let service = AccountService::new();
    let sender = service.create_account("Ben", "Scott").await.unwrap();
    service.deposit(sender.id, dec!(2500)).await.unwrap();

    let result = service.wire_transfer(sender.id, 999, dec!(500)).await;
    assert!(matches!(result, Err(Error::AccountNotFound(_))));

    let sender = service.get_account(&AccountKey::Id(sender.id)).await.unwrap();
    assert_eq!(sender.balance, dec!(2500));
    assert_eq!(sender.transactions.len(), 1);
}

#[tokio::test]
async fn test_wire_transfer_validation() {
    let service = AccountService::new();
    let sender = service.create_account("Ben", "Scott").await.unwrap();
    let receiver = service.create_account("Bill", "Jones").await.unwrap();
    service.deposit(sender.id, dec!(100)).await.unwrap();

    let result = service.wire_transfer(sender.id, sender.id, dec!(50)).await;
    assert!(matches!(result, Err(Error::Validation(_))));

    let result = service.wire_transfer(sender.id, receiver.id, dec!(-50)).await;
    assert!(matches!(result, Err(Error::InvalidAmount(_))));

    // Source with no positive balance cannot send
    let result = service.wire_transfer(receiver.id, sender.id, dec!(50)).await;
    assert!(matches!(result, Err(Error::InsufficientFunds(_))));
}

#[tokio::test]
async fn test_wire_transfer_bypasses_daily_cap() {
    let service = AccountService::new();
    let sender = service.create_account("Ben", "Scott").await.unwrap();
    let receiver = service.create_account("Bill", "Jones").await.unwrap();

    // Exhaust the daily deposit cap entirely
    service.deposit(sender.id, dec!(5000)).await.unwrap();
    assert_eq!(service.limits().remaining().await, Amount::ZERO);

    // Transfer credits are exempt from the window and cap
    service.wire_transfer(sender.id, receiver.id, dec!(1000)).await.unwrap();

    let receiver = service.get_account(&AccountKey::Id(receiver.id)).await.unwrap();
    assert_eq!(receiver.balance, dec!(1000));
}
