use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::{account_repo, chat_repo};
use crate::errors::AppError;
use crate::models::ChatMessage;
use crate::AppState;

use super::ApiResponse;

const DEFAULT_CHAT_LIMIT: i64 = 50;
const MAX_CHAT_LIMIT: i64 = 200;
const MAX_MESSAGE_CHARS: usize = 1_000;

#[derive(Deserialize)]
pub struct PostMessageRequest {
    pub account_id: Uuid,
    pub content: String,
}

#[derive(Deserialize)]
pub struct ChatQuery {
    pub limit: Option<i64>,
}

/// POST /api/chat — add a message to the shared feed
pub async fn post(
    State(state): State<AppState>,
    Json(body): Json<PostMessageRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ChatMessage>>), AppError> {
    let content = body.content.trim();
    if content.is_empty() {
        return Err(AppError::BadRequest("message must not be empty".into()));
    }
    if content.chars().count() > MAX_MESSAGE_CHARS {
        return Err(AppError::BadRequest(format!(
            "message must be at most {MAX_MESSAGE_CHARS} characters"
        )));
    }

    if account_repo::get_account(&state.db, body.account_id).await?.is_none() {
        return Err(AppError::NotFound("account not found".into()));
    }

    let message = chat_repo::insert_message(&state.db, body.account_id, content).await?;
    tracing::debug!(message_id = %message.id, account_id = %message.account_id, "Chat message posted");

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(message))))
}

/// GET /api/chat?limit=N — newest messages first
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ChatQuery>,
) -> Result<Json<ApiResponse<Vec<ChatMessage>>>, AppError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_CHAT_LIMIT)
        .clamp(1, MAX_CHAT_LIMIT);

    let messages = chat_repo::get_recent_messages(&state.db, limit).await?;
    Ok(Json(ApiResponse::ok(messages)))
}
