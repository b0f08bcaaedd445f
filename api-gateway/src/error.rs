//! Error handling for the API gateway

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::error::Error;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error information
    pub error: ErrorInfo,
    /// Request ID for tracing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Detailed error information
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Error code (string identifier for the error type)
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Service error carried through an axum handler
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Generate a request ID for tracking errors
        let request_id = Uuid::new_v4().to_string();

        // Log the error with request ID for backend tracing
        tracing::error!("API Error [{}]: {:?}", request_id, &self.0);

        let (status, code, details) = match &self.0 {
            // Client errors (4xx)
            Error::AccountNotFound(_) => (StatusCode::NOT_FOUND, "account_not_found", None),
            Error::LastNameExists(_) => (StatusCode::CONFLICT, "last_name_exists", None),
            Error::InvalidAmount(_) => (StatusCode::BAD_REQUEST, "invalid_amount", None),
            Error::DepositWindowInvalid(_) => {
                (StatusCode::BAD_REQUEST, "deposit_window_invalid", None)
            }
            Error::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error", None),
            Error::InsufficientFunds(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "insufficient_funds", None)
            }
            Error::DepositLimitExceeded(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "deposit_limit_exceeded",
                None,
            ),

            // Server errors (5xx)
            Error::TransferInconsistency(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "transfer_inconsistency",
                None,
            ),
            Error::Configuration(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "configuration_error",
                None,
            ),
            Error::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None),
            Error::Database(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "database_error",
                Some(serde_json::json!({
                    "db_error": e.to_string(),
                })),
            ),
        };

        let error_response = ErrorResponse {
            error: ErrorInfo {
                code: code.to_string(),
                message: self.0.to_string(),
                details,
            },
            request_id: Some(request_id),
        };

        (status, Json(error_response)).into_response()
    }
}
