use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use barberledger_core::errors::{DatabaseError, Error as CoreError};
use barberledger_core::forecast::ForecastError;
use barberledger_core::transactions::TransactionError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("Not Found")]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Internal(String),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

fn core_error_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::Validation(_) => StatusCode::BAD_REQUEST,
        CoreError::Forecast(ForecastError::InsufficientData { .. }) => StatusCode::NOT_FOUND,
        CoreError::Forecast(ForecastError::UnsupportedHorizon(_)) => StatusCode::BAD_REQUEST,
        CoreError::Transaction(TransactionError::NotFound(_)) => StatusCode::NOT_FOUND,
        CoreError::Transaction(TransactionError::InvalidKind(_)) => StatusCode::BAD_REQUEST,
        CoreError::Database(DatabaseError::NotFound(_)) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            ApiError::Core(e) => (core_error_status(e), e.to_string()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            ApiError::Unauthorized(reason) => (StatusCode::UNAUTHORIZED, reason.clone()),
            ApiError::Forbidden(reason) => (StatusCode::FORBIDDEN, reason.clone()),
            ApiError::Internal(reason) => (StatusCode::INTERNAL_SERVER_ERROR, reason.clone()),
            ApiError::Anyhow(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        // Server-side detail stays in the logs; clients get the correlation
        // id via the x-request-id response header.
        let msg = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Internal error: {}", msg);
            "Internal server error".to_string()
        } else {
            msg
        };

        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: msg,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
