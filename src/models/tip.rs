use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::TipOutcome;

/// Database row for tips table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tip {
    pub id: Uuid,
    pub account_id: Uuid,
    pub sport: String,
    pub content: String,
    pub odds: Decimal,
    pub points_wagered: i64,
    pub outcome: String,
    pub points_won: Option<i64>,
    pub fixture_id: Option<Uuid>,
    pub selection: Option<String>,
    pub created_at: DateTime<Utc>,
    pub settled_at: Option<DateTime<Utc>>,
}

impl Tip {
    /// Parsed outcome. `None` only if the row holds a value outside the CHECK set.
    pub fn outcome(&self) -> Option<TipOutcome> {
        TipOutcome::from_db_str(&self.outcome)
    }

    pub fn is_pending(&self) -> bool {
        self.outcome().is_some_and(|o| !o.is_settled())
    }
}

/// Tip outcome constants as stored in the `outcome` column.
pub mod tip_outcome {
    pub const PENDING: &str = "pending";
    pub const WON: &str = "won";
    pub const LOST: &str = "lost";
}
