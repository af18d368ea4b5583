use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Chat feed message joined with the author's username.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatMessage {
    pub id: Uuid,
    pub account_id: Uuid,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// One side of a follow relation, as listed for an account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FollowEntry {
    pub account_id: Uuid,
    pub username: String,
    pub followed_at: DateTime<Utc>,
}
