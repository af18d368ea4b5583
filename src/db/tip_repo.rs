use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::{tip_outcome, Selection, Tip};

/// Insert a pending tip. Runs inside the wager transaction.
#[allow(clippy::too_many_arguments)]
pub async fn insert_tip(
    conn: &mut PgConnection,
    account_id: Uuid,
    sport: &str,
    content: &str,
    odds: Decimal,
    points_wagered: i64,
    fixture_id: Option<Uuid>,
    selection: Option<Selection>,
) -> sqlx::Result<Tip> {
    sqlx::query_as::<_, Tip>(
        r#"
        INSERT INTO tips (account_id, sport, content, odds, points_wagered, outcome, fixture_id, selection)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(account_id)
    .bind(sport)
    .bind(content)
    .bind(odds)
    .bind(points_wagered)
    .bind(tip_outcome::PENDING)
    .bind(fixture_id)
    .bind(selection.map(|s| s.as_db_str()))
    .fetch_one(conn)
    .await
}

/// Pending tips placed on a fixture, oldest first.
pub async fn get_pending_tips_for_fixture(pool: &PgPool, fixture_id: Uuid) -> sqlx::Result<Vec<Tip>> {
    sqlx::query_as::<_, Tip>(
        "SELECT * FROM tips WHERE fixture_id = $1 AND outcome = $2 ORDER BY created_at",
    )
    .bind(fixture_id)
    .bind(tip_outcome::PENDING)
    .fetch_all(pool)
    .await
}

pub async fn get_tip(pool: &PgPool, tip_id: Uuid) -> sqlx::Result<Option<Tip>> {
    sqlx::query_as::<_, Tip>("SELECT * FROM tips WHERE id = $1")
        .bind(tip_id)
        .fetch_optional(pool)
        .await
}

/// Owner of a tip. The owner never changes, so no lock is needed.
pub async fn get_tip_owner(conn: &mut PgConnection, tip_id: Uuid) -> sqlx::Result<Option<Uuid>> {
    let row: Option<(Uuid,)> = sqlx::query_as("SELECT account_id FROM tips WHERE id = $1")
        .bind(tip_id)
        .fetch_optional(conn)
        .await?;

    Ok(row.map(|r| r.0))
}

/// Read a tip and hold its row lock until the surrounding transaction ends.
pub async fn lock_tip(conn: &mut PgConnection, tip_id: Uuid) -> sqlx::Result<Option<Tip>> {
    sqlx::query_as::<_, Tip>("SELECT * FROM tips WHERE id = $1 FOR UPDATE")
        .bind(tip_id)
        .fetch_optional(conn)
        .await
}

/// Record the settlement. Only a pending tip is updated.
pub async fn mark_settled(
    conn: &mut PgConnection,
    tip_id: Uuid,
    outcome: &str,
    points_won: i64,
) -> sqlx::Result<Option<Tip>> {
    sqlx::query_as::<_, Tip>(
        r#"
        UPDATE tips
        SET outcome = $2, points_won = $3, settled_at = NOW()
        WHERE id = $1 AND outcome = $4
        RETURNING *
        "#,
    )
    .bind(tip_id)
    .bind(outcome)
    .bind(points_won)
    .bind(tip_outcome::PENDING)
    .fetch_optional(conn)
    .await
}

pub async fn get_tips_by_account(pool: &PgPool, account_id: Uuid) -> sqlx::Result<Vec<Tip>> {
    sqlx::query_as::<_, Tip>(
        "SELECT * FROM tips WHERE account_id = $1 ORDER BY created_at DESC",
    )
    .bind(account_id)
    .fetch_all(pool)
    .await
}

/// Most recent tips across all accounts.
pub async fn get_latest_tips(pool: &PgPool, limit: i64) -> sqlx::Result<Vec<Tip>> {
    sqlx::query_as::<_, Tip>("SELECT * FROM tips ORDER BY created_at DESC LIMIT $1")
        .bind(limit)
        .fetch_all(pool)
        .await
}

/// Mean odds over every tip the account has placed. `None` when it has none.
pub async fn get_average_odds(pool: &PgPool, account_id: Uuid) -> sqlx::Result<Option<Decimal>> {
    let row: (Option<Decimal>,) =
        sqlx::query_as("SELECT AVG(odds) FROM tips WHERE account_id = $1")
            .bind(account_id)
            .fetch_one(pool)
            .await?;

    Ok(row.0)
}
