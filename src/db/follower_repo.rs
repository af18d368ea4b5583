use sqlx::PgPool;
use uuid::Uuid;

use crate::models::FollowEntry;

/// Returns false when the relation already existed.
pub async fn follow(pool: &PgPool, account_id: Uuid, follower_id: Uuid) -> sqlx::Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO followers (account_id, follower_id)
        VALUES ($1, $2)
        ON CONFLICT (account_id, follower_id) DO NOTHING
        "#,
    )
    .bind(account_id)
    .bind(follower_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Returns false when there was nothing to remove.
pub async fn unfollow(pool: &PgPool, account_id: Uuid, follower_id: Uuid) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM followers WHERE account_id = $1 AND follower_id = $2")
        .bind(account_id)
        .bind(follower_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() == 1)
}

/// Accounts following `account_id`.
pub async fn get_followers(pool: &PgPool, account_id: Uuid) -> sqlx::Result<Vec<FollowEntry>> {
    sqlx::query_as::<_, FollowEntry>(
        r#"
        SELECT a.id AS account_id, a.username, f.created_at AS followed_at
        FROM followers f
        JOIN tipster_accounts a ON a.id = f.follower_id
        WHERE f.account_id = $1
        ORDER BY f.created_at DESC, a.id ASC
        "#,
    )
    .bind(account_id)
    .fetch_all(pool)
    .await
}

/// Accounts `follower_id` follows.
pub async fn get_following(pool: &PgPool, follower_id: Uuid) -> sqlx::Result<Vec<FollowEntry>> {
    sqlx::query_as::<_, FollowEntry>(
        r#"
        SELECT a.id AS account_id, a.username, f.created_at AS followed_at
        FROM followers f
        JOIN tipster_accounts a ON a.id = f.account_id
        WHERE f.follower_id = $1
        ORDER BY f.created_at DESC, a.id ASC
        "#,
    )
    .bind(follower_id)
    .fetch_all(pool)
    .await
}
