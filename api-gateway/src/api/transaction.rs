//! Transaction history API handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use common::model::account::AccountKey;
use transaction_service::TransactionView;

use crate::api::response::ApiListResponse;
use crate::error::ApiError;
use crate::AppState;

/// Get the most recent transactions of an account, newest first
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{id}/transactions",
    params(
        ("id" = i64, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "Recent transactions retrieved successfully"),
        (status = 404, description = "Account not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "transaction"
)]
pub async fn recent_transactions(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<ApiListResponse<TransactionView>, ApiError> {
    let views = state
        .transaction_service
        .recent_transactions(&AccountKey::Id(id))
        .await?;

    Ok(ApiListResponse::new(views))
}
