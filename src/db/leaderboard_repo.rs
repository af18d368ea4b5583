use sqlx::PgPool;

use crate::models::{tip_outcome, LeaderboardRow};

/// Rank all accounts by balance. Each statement sees one snapshot, so the
/// counts and balances are mutually consistent.
pub async fn get_top_accounts(pool: &PgPool, limit: i64) -> sqlx::Result<Vec<LeaderboardRow>> {
    sqlx::query_as::<_, LeaderboardRow>(
        r#"
        SELECT a.id AS account_id,
               a.username,
               a.points_balance,
               COUNT(t.id) AS total_bets,
               COUNT(t.id) FILTER (WHERE t.outcome = $2) AS total_wins
        FROM tipster_accounts a
        LEFT JOIN tips t ON t.account_id = a.id
        GROUP BY a.id
        ORDER BY a.points_balance DESC, a.id ASC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .bind(tip_outcome::WON)
    .fetch_all(pool)
    .await
}

/// Rank accounts that have tipped in `sport`, counting only that sport's tips.
pub async fn get_top_accounts_for_sport(
    pool: &PgPool,
    sport: &str,
    limit: i64,
) -> sqlx::Result<Vec<LeaderboardRow>> {
    sqlx::query_as::<_, LeaderboardRow>(
        r#"
        SELECT a.id AS account_id,
               a.username,
               a.points_balance,
               COUNT(t.id) AS total_bets,
               COUNT(t.id) FILTER (WHERE t.outcome = $3) AS total_wins
        FROM tipster_accounts a
        JOIN tips t ON t.account_id = a.id AND t.sport = $1
        GROUP BY a.id
        ORDER BY a.points_balance DESC, a.id ASC
        LIMIT $2
        "#,
    )
    .bind(sport)
    .bind(limit)
    .bind(tip_outcome::WON)
    .fetch_all(pool)
    .await
}
