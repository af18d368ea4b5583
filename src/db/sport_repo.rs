use sqlx::PgPool;

use crate::models::Sport;

pub async fn get_all_sports(pool: &PgPool) -> sqlx::Result<Vec<Sport>> {
    sqlx::query_as::<_, Sport>("SELECT name, display_name FROM sports ORDER BY name")
        .fetch_all(pool)
        .await
}

pub async fn sport_exists(pool: &PgPool, name: &str) -> sqlx::Result<bool> {
    let row: (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM sports WHERE name = $1)")
        .bind(name)
        .fetch_one(pool)
        .await?;

    Ok(row.0)
}
