use std::env;

use crate::ledger::MAX_LEADERBOARD_ROWS;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub db_max_connections: u32,

    // Monthly balance reset scheduler
    pub balance_reset_enabled: bool,
    pub balance_reset_interval_secs: u64,

    // Leaderboard
    pub leaderboard_limit: i64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".into())
                .parse()
                .unwrap_or(10),

            balance_reset_enabled: env::var("BALANCE_RESET_ENABLED")
                .unwrap_or_else(|_| "true".into())
                .parse()
                .unwrap_or(true),
            balance_reset_interval_secs: env::var("BALANCE_RESET_INTERVAL_SECS")
                .unwrap_or_else(|_| "3600".into())
                .parse()
                .unwrap_or(3600),

            leaderboard_limit: env::var("LEADERBOARD_LIMIT")
                .unwrap_or_else(|_| MAX_LEADERBOARD_ROWS.to_string())
                .parse::<i64>()
                .unwrap_or(MAX_LEADERBOARD_ROWS)
                .clamp(1, MAX_LEADERBOARD_ROWS),
        })
    }

    /// Config for tests and tools that bring their own database URL.
    pub fn with_database_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            host: "127.0.0.1".into(),
            port: 0,
            db_max_connections: 5,
            balance_reset_enabled: false,
            balance_reset_interval_secs: 3600,
            leaderboard_limit: MAX_LEADERBOARD_ROWS,
        }
    }
}
