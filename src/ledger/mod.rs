//! Points-wagering ledger: balance debits on wager placement, credits on
//! settlement (per tip or per finished fixture), periodic balance resets and
//! the derived tipster statistics.

pub mod service;
pub mod wager;

pub use service::{
    account_stats, create_account, leaderboard, place_wager, record_result, reset_balance,
    reset_stale_balances, settle_fixture, settle_wager,
};
pub use wager::{
    points_won, validate_odds, win_rate, WagerRequest, MAX_LEADERBOARD_ROWS, MAX_ODDS, ODDS_SCALE,
    STARTING_BALANCE,
};

use rust_decimal::Decimal;
use uuid::Uuid;

/// Ledger operation failure. Every variant except `Database` is raised before
/// any write, so the caller never observes a partial update.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("invalid wager: {0}")]
    InvalidWager(String),

    #[error("invalid account: {0}")]
    InvalidAccount(String),

    #[error("payout for {points_wagered} points at odds {odds} is out of range")]
    PayoutOutOfRange { points_wagered: i64, odds: Decimal },

    #[error("insufficient balance: wagered {requested}, available {available}")]
    InsufficientBalance { requested: i64, available: i64 },

    #[error("unknown sport: {0}")]
    UnknownSport(String),

    #[error("tip {0} is already settled")]
    AlreadySettled(Uuid),

    #[error("account {0} not found")]
    AccountNotFound(Uuid),

    #[error("fixture {0} not found")]
    FixtureNotFound(Uuid),

    #[error("fixture {0} has no result yet")]
    ResultPending(Uuid),

    #[error("fixture {0} already has a result")]
    ResultAlreadyRecorded(Uuid),

    #[error("tip {0} not found")]
    TipNotFound(Uuid),

    #[error("username {0} is already taken")]
    UsernameTaken(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
