//! HTTP error responses
//!
//! Every handler failure ends up as a JSON body with a `message` field.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde_json::json;
use thiserror::Error;

use crate::core::ValidationIssue;
use crate::storage::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed with {} issue(s)", .0.len())]
    Validation(Vec<ValidationIssue>),
    #[error("invalid user id")]
    InvalidUserId,
    #[error("route not found")]
    NotFound,
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidUserId => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        error!("Storage failure: {e}");
        ApiError::Internal(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Internal details stay in the log
        let body = match self {
            ApiError::Validation(errors) => json!({
                "message": "Validation error",
                "errors": errors,
            }),
            ApiError::InvalidUserId => json!({ "message": "Invalid user ID" }),
            ApiError::NotFound => json!({ "message": "Not found" }),
            ApiError::Internal(_) => json!({ "message": "Internal server error" }),
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
