use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use super::LedgerError;
use crate::models::Selection;

/// Balance every account starts with and returns to on reset.
pub const STARTING_BALANCE: i64 = 1_000;

/// Hard cap on leaderboard size.
pub const MAX_LEADERBOARD_ROWS: i64 = 100;

/// Decimal places the `odds` columns keep (`NUMERIC(10, 4)`).
pub const ODDS_SCALE: u32 = 4;

/// Largest odds the `odds` columns can hold: 999999.9999.
pub const MAX_ODDS: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, ODDS_SCALE);

/// Wager input as collected by the presentation layer.
///
/// Either `odds` is given directly with a `sport`, or `fixture_id` plus
/// `selection` name a quoted price, in which case the sport and odds come
/// from the fixture.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WagerRequest {
    #[serde(default)]
    pub sport: String,
    pub odds: Option<Decimal>,
    pub points_wagered: i64,
    #[serde(default)]
    pub content: String,
    pub fixture_id: Option<Uuid>,
    pub selection: Option<Selection>,
}

impl WagerRequest {
    /// Sport slug as stored: trimmed and lowercased.
    pub fn sport_slug(&self) -> String {
        self.sport.trim().to_lowercase()
    }
}

/// Shape checks that need no account state. Odds must be storable exactly,
/// so the payout is computed on the price the tipster was quoted.
pub fn validate_wager(odds: Decimal, points_wagered: i64) -> Result<(), LedgerError> {
    if points_wagered < 1 {
        return Err(LedgerError::InvalidWager(format!(
            "points wagered must be at least 1, got {points_wagered}"
        )));
    }

    validate_odds(odds)?;

    if points_won(points_wagered, odds).is_none() {
        return Err(LedgerError::PayoutOutOfRange { points_wagered, odds });
    }

    Ok(())
}

/// Odds accepted by the ledger: above 1.0, at most `ODDS_SCALE` decimal
/// places, at most `MAX_ODDS`.
pub fn validate_odds(odds: Decimal) -> Result<(), LedgerError> {
    if odds <= Decimal::ONE {
        return Err(LedgerError::InvalidWager(format!(
            "odds must be greater than 1.0, got {odds}"
        )));
    }

    if odds.normalize().scale() > ODDS_SCALE {
        return Err(LedgerError::InvalidWager(format!(
            "odds may have at most {ODDS_SCALE} decimal places, got {odds}"
        )));
    }

    if odds > MAX_ODDS {
        return Err(LedgerError::InvalidWager(format!(
            "odds must not exceed {MAX_ODDS}, got {odds}"
        )));
    }

    Ok(())
}

/// A win must be creditable on top of the balance left after the stake.
pub fn check_payout_headroom(
    points_balance: i64,
    points_wagered: i64,
    odds: Decimal,
) -> Result<i64, LedgerError> {
    points_won(points_wagered, odds)
        .and_then(|payout| (points_balance - points_wagered).checked_add(payout))
        .ok_or(LedgerError::PayoutOutOfRange { points_wagered, odds })
}

/// Reject, never clamp, a wager that would overdraw the balance.
pub fn check_balance(points_balance: i64, points_wagered: i64) -> Result<(), LedgerError> {
    if points_wagered > points_balance {
        return Err(LedgerError::InsufficientBalance {
            requested: points_wagered,
            available: points_balance,
        });
    }

    Ok(())
}

/// Profit credited on a winning tip: `floor(points_wagered * (odds - 1))`.
/// The stake itself is not returned. `None` if the payout exceeds `i64`.
pub fn points_won(points_wagered: i64, odds: Decimal) -> Option<i64> {
    Decimal::from(points_wagered)
        .checked_mul(odds - Decimal::ONE)?
        .floor()
        .to_i64()
}

/// Win rate as a percentage rounded to 2 dp; zero before the first bet.
pub fn win_rate(total_wins: i64, total_bets_placed: i64) -> Decimal {
    if total_bets_placed <= 0 {
        return Decimal::ZERO;
    }

    (Decimal::from(total_wins) * Decimal::ONE_HUNDRED / Decimal::from(total_bets_placed)).round_dp(2)
}

/// First day of `today`'s month. Accounts last reset before it are due a reset.
pub fn month_start(today: NaiveDate) -> NaiveDate {
    today.with_day(1).unwrap_or(today)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_won_round_trip_example() {
        // 200 @ 2.5 → floor(200 × 1.5) = 300
        assert_eq!(points_won(200, Decimal::new(25, 1)), Some(300));
    }

    #[test]
    fn test_points_won_floors_fractional_payout() {
        // 33 @ 1.75 → 24.75 → 24
        assert_eq!(points_won(33, Decimal::new(175, 2)), Some(24));
        // 1 @ 1.01 → 0.01 → 0
        assert_eq!(points_won(1, Decimal::new(101, 2)), Some(0));
    }

    #[test]
    fn test_validate_wager_rejects_bad_input() {
        assert!(matches!(
            validate_wager(Decimal::from(2), 0),
            Err(LedgerError::InvalidWager(_))
        ));
        assert!(matches!(
            validate_wager(Decimal::from(2), -5),
            Err(LedgerError::InvalidWager(_))
        ));
        assert!(matches!(
            validate_wager(Decimal::ONE, 10),
            Err(LedgerError::InvalidWager(_))
        ));
        assert!(matches!(
            validate_wager(Decimal::new(5, 1), 10),
            Err(LedgerError::InvalidWager(_))
        ));
        assert!(validate_wager(Decimal::new(101, 2), 1).is_ok());
    }

    #[test]
    fn test_check_balance_boundaries() {
        // Whole balance may be staked
        assert!(check_balance(500, 500).is_ok());

        match check_balance(0, 1) {
            Err(LedgerError::InsufficientBalance { requested, available }) => {
                assert_eq!(requested, 1);
                assert_eq!(available, 0);
            }
            other => panic!("expected InsufficientBalance, got {other:?}"),
        }
    }

    #[test]
    fn test_win_rate() {
        assert_eq!(win_rate(0, 0), Decimal::ZERO);
        assert_eq!(win_rate(3, 4), Decimal::from(75));
        // 1/3 → 33.33
        assert_eq!(win_rate(1, 3), Decimal::new(3333, 2));
    }

    #[test]
    fn test_month_start() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
        assert_eq!(month_start(today), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(month_start(month_start(today)), month_start(today));
    }

    #[test]
    fn test_sport_slug_normalised() {
        let req = WagerRequest {
            sport: "  Football ".into(),
            odds: Some(Decimal::from(2)),
            points_wagered: 10,
            ..Default::default()
        };
        assert_eq!(req.sport_slug(), "football");
    }

    #[test]
    fn test_odds_must_fit_storage_precision() {
        // 1.00001 would be rounded to 1.0000 by the column
        assert!(matches!(
            validate_wager(Decimal::new(100_001, 5), 10),
            Err(LedgerError::InvalidWager(_))
        ));
        // Trailing zeros beyond the scale are harmless
        assert!(validate_wager(Decimal::new(1_500_000, 6), 10).is_ok());
        assert!(validate_wager(Decimal::new(10_001, 4), 10).is_ok());
    }

    #[test]
    fn test_odds_upper_bound() {
        assert_eq!(MAX_ODDS, Decimal::new(9_999_999_999, 4));
        assert!(validate_wager(MAX_ODDS, 1).is_ok());
        assert!(matches!(
            validate_wager(Decimal::from(1_000_000), 1),
            Err(LedgerError::InvalidWager(_))
        ));
    }

    #[test]
    fn test_payout_overflow_rejected_up_front() {
        // 1e18 × 999998 cannot be represented in i64
        let odds = Decimal::from(999_999);
        assert!(matches!(
            validate_wager(odds, 1_000_000_000_000_000_000),
            Err(LedgerError::PayoutOutOfRange { .. })
        ));

        // Payout fits but balance + payout does not
        let stake = i64::MAX / 4;
        assert!(matches!(
            check_payout_headroom(i64::MAX - 1, stake, Decimal::from(3)),
            Err(LedgerError::PayoutOutOfRange { .. })
        ));
        assert_eq!(check_payout_headroom(1000, 200, Decimal::new(25, 1)).unwrap(), 1100);
    }
}
