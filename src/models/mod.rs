pub mod account;
pub mod fixture;
pub mod leaderboard;
pub mod social;
pub mod sport;
pub mod tip;

pub use account::TipsterAccount;
pub use fixture::{
    Fixture, FixtureOdds, FixtureResult, FixtureSettlement, FixtureSummary, LiveScore, Selection,
    Team,
};
pub use social::{ChatMessage, FollowEntry};
pub use leaderboard::{AccountStats, LeaderboardRow};
pub use sport::Sport;
pub use tip::{tip_outcome, Tip};

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// TipOutcome
// ---------------------------------------------------------------------------

/// Tip lifecycle: `Pending -> Won | Lost`. Both settled states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipOutcome {
    Pending,
    Won,
    Lost,
}

impl TipOutcome {
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            tip_outcome::PENDING => Some(TipOutcome::Pending),
            tip_outcome::WON => Some(TipOutcome::Won),
            tip_outcome::LOST => Some(TipOutcome::Lost),
            _ => None,
        }
    }

    pub fn as_db_str(&self) -> &'static str {
        match self {
            TipOutcome::Pending => tip_outcome::PENDING,
            TipOutcome::Won => tip_outcome::WON,
            TipOutcome::Lost => tip_outcome::LOST,
        }
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, TipOutcome::Pending)
    }
}

impl fmt::Display for TipOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_db_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_db_strings() {
        for outcome in [TipOutcome::Pending, TipOutcome::Won, TipOutcome::Lost] {
            assert_eq!(TipOutcome::from_db_str(outcome.as_db_str()), Some(outcome));
        }
        assert_eq!(TipOutcome::from_db_str("void"), None);
    }

    #[test]
    fn test_only_pending_is_unsettled() {
        assert!(!TipOutcome::Pending.is_settled());
        assert!(TipOutcome::Won.is_settled());
        assert!(TipOutcome::Lost.is_settled());
    }
}
