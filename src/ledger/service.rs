use chrono::{NaiveDate, Utc};
use metrics::counter;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{account_repo, fixture_repo, leaderboard_repo, sport_repo, tip_repo};
use crate::models::{
    AccountStats, FixtureSettlement, LeaderboardRow, Selection, Tip, TipOutcome, TipsterAccount,
};

use super::wager::{
    check_balance, check_payout_headroom, month_start, validate_wager, MAX_LEADERBOARD_ROWS,
};
use super::{points_won, win_rate, LedgerError, WagerRequest, STARTING_BALANCE};

/// Open a ledger account for an identity the caller has already authenticated.
pub async fn create_account(
    pool: &PgPool,
    username: &str,
    today: NaiveDate,
) -> Result<TipsterAccount, LedgerError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(LedgerError::InvalidAccount("username must not be empty".into()));
    }

    match account_repo::insert_account(pool, username, STARTING_BALANCE, today).await {
        Ok(account) => {
            tracing::info!(account_id = %account.id, username = %account.username, "Account created");
            Ok(account)
        }
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            Err(LedgerError::UsernameTaken(username.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Sport and price a wager is placed at.
struct Quote {
    sport: String,
    odds: Decimal,
    fixture_id: Option<Uuid>,
    selection: Option<Selection>,
}

/// A fixture-backed wager takes its sport and odds from the fixture's current
/// prices; any other wager carries its own.
async fn resolve_quote(pool: &PgPool, req: &WagerRequest) -> Result<Quote, LedgerError> {
    let Some(fixture_id) = req.fixture_id else {
        let odds = req
            .odds
            .ok_or_else(|| LedgerError::InvalidWager("odds are required".into()))?;
        return Ok(Quote {
            sport: req.sport_slug(),
            odds,
            fixture_id: None,
            selection: None,
        });
    };

    let selection = req.selection.ok_or_else(|| {
        LedgerError::InvalidWager("a selection is required when backing a fixture".into())
    })?;

    let fixture = fixture_repo::get_fixture(pool, fixture_id)
        .await?
        .ok_or(LedgerError::FixtureNotFound(fixture_id))?;

    if fixture.kickoff_at <= Utc::now() {
        return Err(LedgerError::InvalidWager(format!(
            "fixture {fixture_id} has already kicked off"
        )));
    }

    let odds = fixture_repo::get_odds(pool, fixture_id)
        .await?
        .ok_or_else(|| {
            LedgerError::InvalidWager(format!("fixture {fixture_id} has no quoted odds"))
        })?
        .quote(selection);

    if let Some(requested) = req.odds {
        if requested != odds {
            return Err(LedgerError::InvalidWager(format!(
                "odds moved: requested {requested}, quoted {odds}"
            )));
        }
    }

    Ok(Quote {
        sport: fixture.sport,
        odds,
        fixture_id: Some(fixture_id),
        selection: Some(selection),
    })
}

fn rejected(e: LedgerError) -> LedgerError {
    if !matches!(e, LedgerError::Database(_)) {
        counter!("wagers_rejected_total").increment(1);
    }
    e
}

/// Debit the stake and record a pending tip as one transaction.
///
/// The account row stays locked from the balance read until commit, so two
/// concurrent wagers on one account cannot both pass the balance check.
pub async fn place_wager(
    pool: &PgPool,
    account_id: Uuid,
    req: &WagerRequest,
) -> Result<Tip, LedgerError> {
    let quote = resolve_quote(pool, req).await.map_err(rejected)?;

    validate_wager(quote.odds, req.points_wagered).map_err(rejected)?;

    if !sport_repo::sport_exists(pool, &quote.sport).await? {
        return Err(rejected(LedgerError::UnknownSport(quote.sport)));
    }

    let mut tx = pool.begin().await?;

    let account = account_repo::lock_account(&mut tx, account_id)
        .await?
        .ok_or(LedgerError::AccountNotFound(account_id))?;

    if let Err(e) = check_balance(account.points_balance, req.points_wagered) {
        tracing::debug!(
            account_id = %account_id,
            requested = req.points_wagered,
            available = account.points_balance,
            "Wager rejected: insufficient balance"
        );
        return Err(rejected(e));
    }

    check_payout_headroom(account.points_balance, req.points_wagered, quote.odds)
        .map_err(rejected)?;

    let updated = account_repo::debit_wager(&mut tx, account_id, req.points_wagered).await?;
    let tip = tip_repo::insert_tip(
        &mut tx,
        account_id,
        &quote.sport,
        req.content.trim(),
        quote.odds,
        req.points_wagered,
        quote.fixture_id,
        quote.selection,
    )
    .await?;

    tx.commit().await?;

    counter!("wagers_placed_total").increment(1);
    tracing::info!(
        account_id = %account_id,
        tip_id = %tip.id,
        sport = %tip.sport,
        odds = %tip.odds,
        points_wagered = tip.points_wagered,
        balance = updated.points_balance,
        "Wager placed"
    );

    Ok(tip)
}

/// Resolve a pending tip and return the points credited (0 for a loss).
///
/// Locks the owning account before the tip, the same order `place_wager`
/// uses. A second call on the same tip fails with `AlreadySettled`.
pub async fn settle_wager(pool: &PgPool, tip_id: Uuid, won: bool) -> Result<i64, LedgerError> {
    let mut tx = pool.begin().await?;

    let account_id = tip_repo::get_tip_owner(&mut tx, tip_id)
        .await?
        .ok_or(LedgerError::TipNotFound(tip_id))?;

    let account = account_repo::lock_account(&mut tx, account_id)
        .await?
        .ok_or(LedgerError::AccountNotFound(account_id))?;

    let tip = tip_repo::lock_tip(&mut tx, tip_id)
        .await?
        .ok_or(LedgerError::TipNotFound(tip_id))?;

    if !tip.is_pending() {
        tracing::warn!(tip_id = %tip_id, outcome = %tip.outcome, "Settlement rejected: tip already settled");
        return Err(LedgerError::AlreadySettled(tip_id));
    }

    let (outcome, credited) = if won {
        let payout = points_won(tip.points_wagered, tip.odds)
            .filter(|payout| account.points_balance.checked_add(*payout).is_some())
            .ok_or(LedgerError::PayoutOutOfRange {
                points_wagered: tip.points_wagered,
                odds: tip.odds,
            })?;
        (TipOutcome::Won, payout)
    } else {
        (TipOutcome::Lost, 0)
    };

    tip_repo::mark_settled(&mut tx, tip_id, outcome.as_db_str(), credited)
        .await?
        .ok_or(LedgerError::AlreadySettled(tip_id))?;

    let balance = if won {
        account_repo::credit_win(&mut tx, account_id, credited)
            .await?
            .points_balance
    } else {
        account.points_balance
    };

    tx.commit().await?;

    counter!("wagers_settled_total").increment(1);
    counter!("points_won_total").increment(credited as u64);
    tracing::info!(
        account_id = %account_id,
        tip_id = %tip_id,
        outcome = %outcome,
        points_won = credited,
        balance,
        "Wager settled"
    );

    Ok(credited)
}

/// Store a fixture's final score, then settle every tip placed on it.
pub async fn record_result(
    pool: &PgPool,
    fixture_id: Uuid,
    home_score: i32,
    away_score: i32,
) -> Result<FixtureSettlement, LedgerError> {
    fixture_repo::get_fixture(pool, fixture_id)
        .await?
        .ok_or(LedgerError::FixtureNotFound(fixture_id))?;

    fixture_repo::insert_result(pool, fixture_id, home_score, away_score)
        .await?
        .ok_or(LedgerError::ResultAlreadyRecorded(fixture_id))?;

    tracing::info!(fixture_id = %fixture_id, home_score, away_score, "Result recorded");

    settle_fixture(pool, fixture_id).await
}

/// Settle the pending tips on a fixture against its recorded result.
///
/// Each tip settles in its own transaction through `settle_wager`, so a rerun
/// after a partial failure picks up only what is still pending.
pub async fn settle_fixture(
    pool: &PgPool,
    fixture_id: Uuid,
) -> Result<FixtureSettlement, LedgerError> {
    let result = match fixture_repo::get_result(pool, fixture_id).await? {
        Some(result) => result,
        None => {
            return match fixture_repo::get_fixture(pool, fixture_id).await? {
                Some(_) => Err(LedgerError::ResultPending(fixture_id)),
                None => Err(LedgerError::FixtureNotFound(fixture_id)),
            };
        }
    };

    let mut settlement = FixtureSettlement {
        fixture_id,
        ..Default::default()
    };

    for tip in tip_repo::get_pending_tips_for_fixture(pool, fixture_id).await? {
        let Some(selection) = tip.selection.as_deref().and_then(Selection::from_db_str) else {
            tracing::warn!(tip_id = %tip.id, fixture_id = %fixture_id, "Fixture tip has no selection, skipping");
            continue;
        };

        let won = selection.wins(result.home_score, result.away_score);
        match settle_wager(pool, tip.id, won).await {
            Ok(credited) => {
                settlement.tips_settled += 1;
                if won {
                    settlement.tips_won += 1;
                }
                settlement.points_won += credited;
            }
            Err(LedgerError::AlreadySettled(_)) => {}
            Err(e) => return Err(e),
        }
    }

    tracing::info!(
        fixture_id = %fixture_id,
        tips_settled = settlement.tips_settled,
        tips_won = settlement.tips_won,
        points_won = settlement.points_won,
        "Fixture settled"
    );

    Ok(settlement)
}

/// Restore an account to the starting balance. Bet counters are untouched.
pub async fn reset_balance(
    pool: &PgPool,
    account_id: Uuid,
    today: NaiveDate,
) -> Result<TipsterAccount, LedgerError> {
    let account = account_repo::reset_balance(pool, account_id, STARTING_BALANCE, today)
        .await?
        .ok_or(LedgerError::AccountNotFound(account_id))?;

    counter!("balances_reset_total").increment(1);
    tracing::info!(account_id = %account_id, %today, "Balance reset");

    Ok(account)
}

/// Reset every account not yet reset in `today`'s calendar month.
/// Running it again within the same month touches nothing.
pub async fn reset_stale_balances(pool: &PgPool, today: NaiveDate) -> Result<u64, LedgerError> {
    let cutoff = month_start(today);
    let count =
        account_repo::reset_balances_before(pool, cutoff, STARTING_BALANCE, today).await?;

    if count > 0 {
        counter!("balances_reset_total").increment(count);
        tracing::info!(count, %cutoff, "Stale balances reset");
    }

    Ok(count)
}

/// Balance, counters and the derived win rate / average odds.
pub async fn account_stats(pool: &PgPool, account_id: Uuid) -> Result<AccountStats, LedgerError> {
    let account = account_repo::get_account(pool, account_id)
        .await?
        .ok_or(LedgerError::AccountNotFound(account_id))?;

    let average_odds = tip_repo::get_average_odds(pool, account_id)
        .await?
        .map(|avg| avg.round_dp(2))
        .unwrap_or(Decimal::ZERO);

    Ok(AccountStats {
        account_id,
        points_balance: account.points_balance,
        total_bets_placed: account.total_bets_placed,
        total_wins: account.total_wins,
        win_rate: win_rate(account.total_wins, account.total_bets_placed),
        average_odds,
    })
}

/// Accounts ranked by balance (ties by id), optionally restricted to one sport.
pub async fn leaderboard(
    pool: &PgPool,
    sport: Option<&str>,
    limit: i64,
) -> Result<Vec<LeaderboardRow>, LedgerError> {
    let limit = limit.clamp(1, MAX_LEADERBOARD_ROWS);

    match sport.map(|s| s.trim().to_lowercase()) {
        Some(sport) if !sport.is_empty() => {
            if !sport_repo::sport_exists(pool, &sport).await? {
                return Err(LedgerError::UnknownSport(sport));
            }
            Ok(leaderboard_repo::get_top_accounts_for_sport(pool, &sport, limit).await?)
        }
        _ => Ok(leaderboard_repo::get_top_accounts(pool, limit).await?),
    }
}
