pub mod account_repo;
pub mod chat_repo;
pub mod fixture_repo;
pub mod follower_repo;
pub mod leaderboard_repo;
pub mod sport_repo;
pub mod tip_repo;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub async fn init_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    // Verify connectivity
    sqlx::query("SELECT 1").execute(&pool).await?;

    Ok(pool)
}
