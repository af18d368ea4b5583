use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One ranked leaderboard line. Counts are aggregated over the tips in scope
/// (all tips, or only one sport's tips when filtered).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LeaderboardRow {
    pub account_id: Uuid,
    pub username: String,
    pub points_balance: i64,
    pub total_bets: i64,
    pub total_wins: i64,
}

/// Derived per-account metrics shown on a tipster profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountStats {
    pub account_id: Uuid,
    pub points_balance: i64,
    pub total_bets_placed: i64,
    pub total_wins: i64,
    pub win_rate: Decimal,
    pub average_odds: Decimal,
}
