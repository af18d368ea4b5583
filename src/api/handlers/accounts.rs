use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::{account_repo, tip_repo};
use crate::errors::AppError;
use crate::ledger::{self, WagerRequest};
use crate::models::{AccountStats, Tip, TipsterAccount};
use crate::AppState;

use super::ApiResponse;

#[derive(Deserialize)]
pub struct CreateAccountRequest {
    pub username: String,
}

/// POST /api/accounts — open a ledger account with the starting balance
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TipsterAccount>>), AppError> {
    let today = Utc::now().date_naive();
    let account = ledger::create_account(&state.db, &body.username, today).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(account))))
}

/// GET /api/accounts/{id}
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TipsterAccount>>, AppError> {
    let account = account_repo::get_account(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("account not found".into()))?;

    Ok(Json(ApiResponse::ok(account)))
}

/// GET /api/accounts/{id}/stats — balance, win rate, average odds
pub async fn stats(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AccountStats>>, AppError> {
    let stats = ledger::account_stats(&state.db, id).await?;
    Ok(Json(ApiResponse::ok(stats)))
}

/// GET /api/accounts/{id}/tips — the account's tips, newest first
pub async fn tips(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Tip>>>, AppError> {
    if account_repo::get_account(&state.db, id).await?.is_none() {
        return Err(AppError::NotFound("account not found".into()));
    }

    let tips = tip_repo::get_tips_by_account(&state.db, id).await?;
    Ok(Json(ApiResponse::ok(tips)))
}

/// POST /api/accounts/{id}/tips — place a wager
pub async fn place_tip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<WagerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Tip>>), AppError> {
    let tip = ledger::place_wager(&state.db, id, &body).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(tip))))
}

/// POST /api/accounts/{id}/reset — restore the starting balance
pub async fn reset(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TipsterAccount>>, AppError> {
    let today = Utc::now().date_naive();
    let account = ledger::reset_balance(&state.db, id, today).await?;
    Ok(Json(ApiResponse::ok(account)))
}
