use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::tip_repo;
use crate::errors::AppError;
use crate::ledger;
use crate::models::Tip;
use crate::AppState;

use super::ApiResponse;

const DEFAULT_LATEST_LIMIT: i64 = 50;
const MAX_LATEST_LIMIT: i64 = 100;

#[derive(Deserialize)]
pub struct SettleRequest {
    pub won: bool,
}

#[derive(Serialize)]
pub struct SettleResponse {
    pub tip_id: Uuid,
    pub points_won: i64,
}

#[derive(Deserialize)]
pub struct LatestQuery {
    pub limit: Option<i64>,
}

/// POST /api/tips/{id}/settle — resolve a pending tip as won or lost
pub async fn settle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SettleRequest>,
) -> Result<Json<ApiResponse<SettleResponse>>, AppError> {
    let points_won = ledger::settle_wager(&state.db, id, body.won).await?;

    Ok(Json(ApiResponse::ok(SettleResponse {
        tip_id: id,
        points_won,
    })))
}

/// GET /api/tips/{id}
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Tip>>, AppError> {
    let tip = tip_repo::get_tip(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("tip not found".into()))?;

    Ok(Json(ApiResponse::ok(tip)))
}

/// GET /api/tips/latest?limit=N — newest tips across all tipsters
pub async fn latest(
    State(state): State<AppState>,
    Query(query): Query<LatestQuery>,
) -> Result<Json<ApiResponse<Vec<Tip>>>, AppError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_LATEST_LIMIT)
        .clamp(1, MAX_LATEST_LIMIT);

    let tips = tip_repo::get_latest_tips(&state.db, limit).await?;
    Ok(Json(ApiResponse::ok(tips)))
}
