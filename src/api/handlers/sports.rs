use axum::extract::State;
use axum::Json;

use crate::db::sport_repo;
use crate::errors::AppError;
use crate::models::Sport;
use crate::AppState;

use super::ApiResponse;

pub async fn list(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Sport>>>, AppError> {
    let sports = sport_repo::get_all_sports(&state.db).await?;
    Ok(Json(ApiResponse::ok(sports)))
}
