use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::TipsterAccount;

/// Insert a new account with the given starting balance.
pub async fn insert_account(
    pool: &PgPool,
    username: &str,
    starting_balance: i64,
    today: NaiveDate,
) -> sqlx::Result<TipsterAccount> {
    sqlx::query_as::<_, TipsterAccount>(
        r#"
        INSERT INTO tipster_accounts (username, points_balance, last_reset_date)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(username)
    .bind(starting_balance)
    .bind(today)
    .fetch_one(pool)
    .await
}

pub async fn get_account(pool: &PgPool, account_id: Uuid) -> sqlx::Result<Option<TipsterAccount>> {
    sqlx::query_as::<_, TipsterAccount>("SELECT * FROM tipster_accounts WHERE id = $1")
        .bind(account_id)
        .fetch_optional(pool)
        .await
}

/// Read an account and hold its row lock until the surrounding transaction ends.
pub async fn lock_account(
    conn: &mut PgConnection,
    account_id: Uuid,
) -> sqlx::Result<Option<TipsterAccount>> {
    sqlx::query_as::<_, TipsterAccount>(
        "SELECT * FROM tipster_accounts WHERE id = $1 FOR UPDATE",
    )
    .bind(account_id)
    .fetch_optional(conn)
    .await
}

/// Debit a wager and count the bet. Caller must hold the row lock.
pub async fn debit_wager(
    conn: &mut PgConnection,
    account_id: Uuid,
    points_wagered: i64,
) -> sqlx::Result<TipsterAccount> {
    sqlx::query_as::<_, TipsterAccount>(
        r#"
        UPDATE tipster_accounts
        SET points_balance = points_balance - $2,
            total_bets_placed = total_bets_placed + 1
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(account_id)
    .bind(points_wagered)
    .fetch_one(conn)
    .await
}

/// Credit winnings and count the win. Caller must hold the row lock.
pub async fn credit_win(
    conn: &mut PgConnection,
    account_id: Uuid,
    points_won: i64,
) -> sqlx::Result<TipsterAccount> {
    sqlx::query_as::<_, TipsterAccount>(
        r#"
        UPDATE tipster_accounts
        SET points_balance = points_balance + $2,
            total_wins = total_wins + 1
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(account_id)
    .bind(points_won)
    .fetch_one(conn)
    .await
}

/// Restore one account's balance. Bet counters are left alone.
pub async fn reset_balance(
    pool: &PgPool,
    account_id: Uuid,
    balance: i64,
    today: NaiveDate,
) -> sqlx::Result<Option<TipsterAccount>> {
    sqlx::query_as::<_, TipsterAccount>(
        r#"
        UPDATE tipster_accounts
        SET points_balance = $2, last_reset_date = $3
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(account_id)
    .bind(balance)
    .bind(today)
    .fetch_optional(pool)
    .await
}

/// Reset every account last reset before `cutoff`. Returns the number of rows touched.
pub async fn reset_balances_before(
    pool: &PgPool,
    cutoff: NaiveDate,
    balance: i64,
    today: NaiveDate,
) -> sqlx::Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE tipster_accounts
        SET points_balance = $2, last_reset_date = $3
        WHERE last_reset_date < $1
        "#,
    )
    .bind(cutoff)
    .bind(balance)
    .bind(today)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
