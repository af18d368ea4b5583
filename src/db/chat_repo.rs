use sqlx::PgPool;
use uuid::Uuid;

use crate::models::ChatMessage;

pub async fn insert_message(
    pool: &PgPool,
    account_id: Uuid,
    content: &str,
) -> sqlx::Result<ChatMessage> {
    sqlx::query_as::<_, ChatMessage>(
        r#"
        WITH inserted AS (
            INSERT INTO chat_messages (account_id, content)
            VALUES ($1, $2)
            RETURNING *
        )
        SELECT i.id, i.account_id, a.username, i.content, i.created_at
        FROM inserted i
        JOIN tipster_accounts a ON a.id = i.account_id
        "#,
    )
    .bind(account_id)
    .bind(content)
    .fetch_one(pool)
    .await
}

/// Newest messages first.
pub async fn get_recent_messages(pool: &PgPool, limit: i64) -> sqlx::Result<Vec<ChatMessage>> {
    sqlx::query_as::<_, ChatMessage>(
        r#"
        SELECT m.id, m.account_id, a.username, m.content, m.created_at
        FROM chat_messages m
        JOIN tipster_accounts a ON a.id = m.account_id
        ORDER BY m.created_at DESC, m.id DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}
