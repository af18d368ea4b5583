use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::ledger;
use crate::models::LeaderboardRow;
use crate::AppState;

use super::ApiResponse;

#[derive(Deserialize)]
pub struct LeaderboardQuery {
    pub sport: Option<String>,
}

/// GET /api/leaderboard?sport=football
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<ApiResponse<Vec<LeaderboardRow>>>, AppError> {
    let rows = ledger::leaderboard(
        &state.db,
        query.sport.as_deref(),
        state.config.leaderboard_limit,
    )
    .await?;

    Ok(Json(ApiResponse::ok(rows)))
}
