use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::ledger::LedgerError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".into()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".into())
            }
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                error: message,
            }),
        )
            .into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Internal(e.into())
    }
}

impl From<LedgerError> for AppError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::InvalidWager(_)
            | LedgerError::InvalidAccount(_)
            | LedgerError::PayoutOutOfRange { .. }
            | LedgerError::InsufficientBalance { .. }
            | LedgerError::UnknownSport(_) => AppError::BadRequest(e.to_string()),
            LedgerError::AccountNotFound(_)
            | LedgerError::FixtureNotFound(_)
            | LedgerError::TipNotFound(_) => AppError::NotFound(e.to_string()),
            LedgerError::AlreadySettled(_)
            | LedgerError::UsernameTaken(_)
            | LedgerError::ResultPending(_)
            | LedgerError::ResultAlreadyRecorded(_) => AppError::Conflict(e.to_string()),
            LedgerError::Database(e) => AppError::Internal(e.into()),
        }
    }
}
