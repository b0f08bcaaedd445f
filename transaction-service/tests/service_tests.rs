use account_service::AccountService;
use common::decimal::dec;
use common::error::Error;
use common::model::account::AccountKey;
use rust_decimal::Decimal;
use transaction_service::TransactionService;

#[tokio::test]
async fn test_recent_caps_at_ten_newest_first() {
    let accounts = AccountService::new();
    let transactions = TransactionService::new(accounts.repository());

    let account = accounts.create_account("Ben", "Scott").await.unwrap();
    for i in 1..=12 {
        accounts.deposit(account.id, Decimal::from(i)).await.unwrap();
    }

    let views = transactions
        .recent_transactions(&AccountKey::Id(account.id))
        .await
        .unwrap();

    assert_eq!(views.len(), 10);
    assert_eq!(views[0].label, "Deposit of 12$");
    assert_eq!(views[9].label, "Deposit of 3$");
}

#[tokio::test]
async fn test_recent_returns_all_when_under_limit() {
    let accounts = AccountService::new();
    let transactions = TransactionService::new(accounts.repository());

    let account = accounts.create_account("Ben", "Scott").await.unwrap();
    accounts.deposit(account.id, dec!(10)).await.unwrap();
    accounts.deposit(account.id, dec!(20)).await.unwrap();
    accounts.withdraw(account.id, dec!(5)).await.unwrap();

    let views = transactions
        .recent_transactions(&AccountKey::Id(account.id))
        .await
        .unwrap();

    assert_eq!(views.len(), 3);
    assert_eq!(views[0].label, "Withdrawal of 5$");
    assert_eq!(views[0].amount, dec!(5));
    assert_eq!(views[1].label, "Deposit of 20$");
    assert_eq!(views[2].label, "Deposit of 10$");
}

#[tokio::test]
async fn test_recent_empty_history() {
    let accounts = AccountService::new();
    let transactions = TransactionService::new(accounts.repository());

    let account = accounts.create_account("Ben", "Scott").await.unwrap();
    let views = transactions
        .recent_transactions(&AccountKey::Id(account.id))
        .await
        .unwrap();

    assert!(views.is_empty());
}

#[tokio::test]
async fn test_recent_unknown_account() {
    let accounts = AccountService::new();
    let transactions = TransactionService::new(accounts.repository());

    let result = transactions
        .recent_transactions(&AccountKey::FirstName("Nobody".to_string()))
        .await;
    assert!(matches!(result, Err(Error::AccountNotFound(_))));
}
