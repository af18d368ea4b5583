use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// Database row for teams table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub sport: String,
}

/// Database row for fixtures table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Fixture {
    pub id: Uuid,
    pub sport: String,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub kickoff_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Fixture joined with team names and whatever scores and prices exist.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FixtureSummary {
    pub id: Uuid,
    pub sport: String,
    pub home_team: String,
    pub away_team: String,
    pub kickoff_at: DateTime<Utc>,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub live_status: Option<String>,
    pub finished: bool,
    pub home_odds: Option<Decimal>,
    pub away_odds: Option<Decimal>,
    pub draw_odds: Option<Decimal>,
}

/// Database row for fixture_results table. One final score per fixture.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FixtureResult {
    pub fixture_id: Uuid,
    pub home_score: i32,
    pub away_score: i32,
    pub recorded_at: DateTime<Utc>,
}

/// Database row for live_scores table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LiveScore {
    pub fixture_id: Uuid,
    pub home_score: i32,
    pub away_score: i32,
    pub status: String,
    pub updated_at: DateTime<Utc>,
}

/// Database row for fixture_odds table: the current quoted prices.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FixtureOdds {
    pub fixture_id: Uuid,
    pub home_odds: Decimal,
    pub away_odds: Decimal,
    pub draw_odds: Decimal,
    pub updated_at: DateTime<Utc>,
}

impl FixtureOdds {
    pub fn quote(&self, selection: Selection) -> Decimal {
        match selection {
            Selection::Home => self.home_odds,
            Selection::Away => self.away_odds,
            Selection::Draw => self.draw_odds,
        }
    }
}

/// Outcome of settling the pending tips on a finished fixture.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureSettlement {
    pub fixture_id: Uuid,
    pub tips_settled: u64,
    pub tips_won: u64,
    pub points_won: i64,
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Which side of a fixture a tip backs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    Home,
    Away,
    Draw,
}

impl Selection {
    pub fn as_db_str(&self) -> &'static str {
        match self {
            Selection::Home => "home",
            Selection::Away => "away",
            Selection::Draw => "draw",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "home" => Some(Selection::Home),
            "away" => Some(Selection::Away),
            "draw" => Some(Selection::Draw),
            _ => None,
        }
    }

    /// Whether this selection wins given a final score.
    pub fn wins(&self, home_score: i32, away_score: i32) -> bool {
        match self {
            Selection::Home => home_score > away_score,
            Selection::Away => away_score > home_score,
            Selection::Draw => home_score == away_score,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_db_str())
    }
}
