use chrono::Utc;
use sqlx::PgPool;
use tokio::time::{interval, Duration};

use crate::ledger;

/// Periodically restore balances for accounts not yet reset this month.
/// The check is cheap and idempotent, so the interval only bounds how late
/// into a new month the reset lands.
pub async fn run_balance_reset(pool: PgPool, interval_secs: u64) {
    let mut ticker = interval(Duration::from_secs(interval_secs.max(1)));

    loop {
        ticker.tick().await;

        let today = Utc::now().date_naive();
        match ledger::reset_stale_balances(&pool, today).await {
            Ok(0) => tracing::debug!("Balance reset: no accounts due"),
            Ok(count) => tracing::info!(count, %today, "Balance reset: accounts restored"),
            Err(e) => tracing::error!(error = %e, "Balance reset failed"),
        }
    }
}
