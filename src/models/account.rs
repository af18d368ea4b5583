use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for tipster_accounts table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TipsterAccount {
    pub id: Uuid,
    pub username: String,
    pub points_balance: i64,
    pub last_reset_date: NaiveDate,
    pub total_bets_placed: i64,
    pub total_wins: i64,
    pub created_at: DateTime<Utc>,
}
