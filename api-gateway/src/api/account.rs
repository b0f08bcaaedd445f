//! Account API handlers
//!
//! Handles endpoints related to account management:
//! - Create account
//! - Get account details by id, first name, or last name
//! - Deposit and withdraw funds
//! - Wire transfers between accounts

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use common::decimal::Amount;
use common::model::account::{Account, AccountKey};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::response::ApiResponse;
use crate::error::ApiError;
use crate::AppState;

/// Create account request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAccountRequest {
    /// Holder first name
    pub first_name: String,
    /// Holder last name
    pub last_name: String,
}

/// Deposit or withdrawal request
#[derive(Debug, Deserialize, ToSchema)]
pub struct AmountRequest {
    /// Amount to move
    pub amount: Amount,
}

/// Wire transfer request
#[derive(Debug, Deserialize, ToSchema)]
pub struct TransferRequest {
    /// Source account id
    pub from_id: i64,
    /// Destination account id
    pub to_id: i64,
    /// Amount to move
    pub amount: Amount,
}

/// Client-facing projection of an account
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountView {
    /// Holder first name
    pub first_name: String,
    /// Holder last name
    pub last_name: String,
    /// Current balance
    pub balance: Amount,
    /// Preferred notification channel name
    pub notification_preference: String,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            balance: account.balance,
            notification_preference: account.notification_preference.clone(),
        }
    }
}

/// Create a new account
#[utoipa::path(
    post,
    path = "/api/v1/accounts",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account successfully created"),
        (status = 400, description = "Missing or blank holder name"),
        (status = 409, description = "Last name already taken"),
        (status = 500, description = "Internal server error")
    ),
    tag = "account"
)]
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<(StatusCode, ApiResponse<AccountView>), ApiError> {
    let account = state
        .account_service
        .create_account(&request.first_name, &request.last_name)
        .await?;

    Ok((StatusCode::CREATED, ApiResponse::new(AccountView::from(&account))))
}

/// Get an account by ID
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{id}",
    params(
        ("id" = i64, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "Account details retrieved successfully"),
        (status = 404, description = "Account not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "account"
)]
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<AccountView>, ApiError> {
    let account = state.account_service.get_account(&AccountKey::Id(id)).await?;

    Ok(ApiResponse::new(AccountView::from(&account)))
}

/// Get an account by holder first name
#[utoipa::path(
    get,
    path = "/api/v1/accounts/first-name/{first_name}",
    params(
        ("first_name" = String, Path, description = "Holder first name")
    ),
    responses(
        (status = 200, description = "Account details retrieved successfully"),
        (status = 404, description = "Account not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "account"
)]
pub async fn get_account_by_first_name(
    State(state): State<Arc<AppState>>,
    Path(first_name): Path<String>,
) -> Result<ApiResponse<AccountView>, ApiError> {
    let account = state
        .account_service
        .get_account(&AccountKey::FirstName(first_name))
        .await?;

    Ok(ApiResponse::new(AccountView::from(&account)))
}

/// Get an account by holder last name
#[utoipa::path(
    get,
    path = "/api/v1/accounts/last-name/{last_name}",
    params(
        ("last_name" = String, Path, description = "Holder last name")
    ),
    responses(
        (status = 200, description = "Account details retrieved successfully"),
        (status = 404, description = "Account not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "account"
)]
pub async fn get_account_by_last_name(
    State(state): State<Arc<AppState>>,
    Path(last_name): Path<String>,
) -> Result<ApiResponse<AccountView>, ApiError> {
    let account = state
        .account_service
        .get_account(&AccountKey::LastName(last_name))
        .await?;

    Ok(ApiResponse::new(AccountView::from(&account)))
}

/// Deposit funds into an account
#[utoipa::path(
    post,
    path = "/api/v1/accounts/{id}/deposit",
    params(
        ("id" = i64, Path, description = "Account ID")
    ),
    request_body = AmountRequest,
    responses(
        (status = 200, description = "Funds deposited successfully"),
        (status = 400, description = "Invalid amount or deposit window"),
        (status = 404, description = "Account not found"),
        (status = 422, description = "Daily deposit limit exceeded"),
        (status = 500, description = "Internal server error")
    ),
    tag = "account"
)]
pub async fn deposit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(request): Json<AmountRequest>,
) -> Result<ApiResponse<AccountView>, ApiError> {
    let account = state.account_service.deposit(id, request.amount).await?;

    Ok(ApiResponse::new(AccountView::from(&account)))
}

/// Withdraw funds from an account
#[utoipa::path(
    post,
    path = "/api/v1/accounts/{id}/withdraw",
    params(
        ("id" = i64, Path, description = "Account ID")
    ),
    request_body = AmountRequest,
    responses(
        (status = 200, description = "Funds withdrawn successfully"),
        (status = 400, description = "Invalid withdrawal amount"),
        (status = 404, description = "Account not found"),
        (status = 422, description = "Insufficient funds"),
        (status = 500, description = "Internal server error")
    ),
    tag = "account"
)]
pub async fn withdraw(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(request): Json<AmountRequest>,
) -> Result<ApiResponse<AccountView>, ApiError> {
    let account = state.account_service.withdraw(id, request.amount).await?;

    Ok(ApiResponse::new(AccountView::from(&account)))
}

/// Move funds between two accounts
#[utoipa::path(
    post,
    path = "/api/v1/transfers",
    request_body = TransferRequest,
    responses(
        (status = 204, description = "Transfer completed"),
        (status = 400, description = "Invalid transfer request"),
        (status = 404, description = "Account not found"),
        (status = 422, description = "Insufficient funds"),
        (status = 500, description = "Internal server error")
    ),
    tag = "account"
)]
pub async fn wire_transfer(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TransferRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .account_service
        .wire_transfer(request.from_id, request.to_id, request.amount)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
