use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::{account_repo, follower_repo};
use crate::errors::AppError;
use crate::models::FollowEntry;
use crate::AppState;

use super::ApiResponse;

#[derive(Deserialize)]
pub struct FollowRequest {
    pub follower_id: Uuid,
}

#[derive(Serialize)]
pub struct FollowResponse {
    pub account_id: Uuid,
    pub follower_id: Uuid,
    pub following: bool,
    pub changed: bool,
}

async fn require_account(state: &AppState, id: Uuid) -> Result<(), AppError> {
    if account_repo::get_account(&state.db, id).await?.is_none() {
        return Err(AppError::NotFound(format!("account {id} not found")));
    }
    Ok(())
}

/// POST /api/accounts/{id}/follow — `follower_id` starts following `id`
pub async fn follow(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<FollowRequest>,
) -> Result<Json<ApiResponse<FollowResponse>>, AppError> {
    if id == body.follower_id {
        return Err(AppError::BadRequest("an account cannot follow itself".into()));
    }

    require_account(&state, id).await?;
    require_account(&state, body.follower_id).await?;

    let changed = follower_repo::follow(&state.db, id, body.follower_id).await?;
    if changed {
        tracing::info!(account_id = %id, follower_id = %body.follower_id, "Follow added");
    }

    Ok(Json(ApiResponse::ok(FollowResponse {
        account_id: id,
        follower_id: body.follower_id,
        following: true,
        changed,
    })))
}

/// DELETE /api/accounts/{id}/follow — `follower_id` stops following `id`
pub async fn unfollow(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<FollowRequest>,
) -> Result<Json<ApiResponse<FollowResponse>>, AppError> {
    require_account(&state, id).await?;

    let changed = follower_repo::unfollow(&state.db, id, body.follower_id).await?;
    if changed {
        tracing::info!(account_id = %id, follower_id = %body.follower_id, "Follow removed");
    }

    Ok(Json(ApiResponse::ok(FollowResponse {
        account_id: id,
        follower_id: body.follower_id,
        following: false,
        changed,
    })))
}

/// GET /api/accounts/{id}/followers
pub async fn followers(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<FollowEntry>>>, AppError> {
    require_account(&state, id).await?;
    let rows = follower_repo::get_followers(&state.db, id).await?;
    Ok(Json(ApiResponse::ok(rows)))
}

/// GET /api/accounts/{id}/following
pub async fn following(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<FollowEntry>>>, AppError> {
    require_account(&state, id).await?;
    let rows = follower_repo::get_following(&state.db, id).await?;
    Ok(Json(ApiResponse::ok(rows)))
}
