use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Fixture, FixtureOdds, FixtureResult, FixtureSummary, LiveScore, Team};

pub async fn insert_team(pool: &PgPool, name: &str, sport: &str) -> sqlx::Result<Team> {
    sqlx::query_as::<_, Team>(
        "INSERT INTO teams (name, sport) VALUES ($1, $2) RETURNING *",
    )
    .bind(name)
    .bind(sport)
    .fetch_one(pool)
    .await
}

pub async fn get_team(pool: &PgPool, team_id: Uuid) -> sqlx::Result<Option<Team>> {
    sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE id = $1")
        .bind(team_id)
        .fetch_optional(pool)
        .await
}

pub async fn get_teams_by_sport(pool: &PgPool, sport: &str) -> sqlx::Result<Vec<Team>> {
    sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE sport = $1 ORDER BY name")
        .bind(sport)
        .fetch_all(pool)
        .await
}

pub async fn insert_fixture(
    pool: &PgPool,
    sport: &str,
    home_team_id: Uuid,
    away_team_id: Uuid,
    kickoff_at: DateTime<Utc>,
) -> sqlx::Result<Fixture> {
    sqlx::query_as::<_, Fixture>(
        r#"
        INSERT INTO fixtures (sport, home_team_id, away_team_id, kickoff_at)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(sport)
    .bind(home_team_id)
    .bind(away_team_id)
    .bind(kickoff_at)
    .fetch_one(pool)
    .await
}

pub async fn get_fixture(pool: &PgPool, fixture_id: Uuid) -> sqlx::Result<Option<Fixture>> {
    sqlx::query_as::<_, Fixture>("SELECT * FROM fixtures WHERE id = $1")
        .bind(fixture_id)
        .fetch_optional(pool)
        .await
}

const SUMMARY_SELECT: &str = r#"
    SELECT f.id,
           f.sport,
           h.name AS home_team,
           a.name AS away_team,
           f.kickoff_at,
           COALESCE(r.home_score, l.home_score) AS home_score,
           COALESCE(r.away_score, l.away_score) AS away_score,
           l.status AS live_status,
           (r.fixture_id IS NOT NULL) AS finished,
           o.home_odds,
           o.away_odds,
           o.draw_odds
    FROM fixtures f
    JOIN teams h ON h.id = f.home_team_id
    JOIN teams a ON a.id = f.away_team_id
    LEFT JOIN fixture_results r ON r.fixture_id = f.id
    LEFT JOIN live_scores l ON l.fixture_id = f.id
    LEFT JOIN fixture_odds o ON o.fixture_id = f.id
"#;

/// Fixtures not yet finished, soonest kickoff first. Optional sport filter.
pub async fn get_upcoming_fixtures(
    pool: &PgPool,
    sport: Option<&str>,
    limit: i64,
) -> sqlx::Result<Vec<FixtureSummary>> {
    let sql = format!(
        "{SUMMARY_SELECT} WHERE r.fixture_id IS NULL AND ($1::text IS NULL OR f.sport = $1) \
         ORDER BY f.kickoff_at ASC, f.id ASC LIMIT $2"
    );
    sqlx::query_as::<_, FixtureSummary>(&sql)
        .bind(sport)
        .bind(limit)
        .fetch_all(pool)
        .await
}

/// Finished fixtures, most recent kickoff first. Optional sport filter.
pub async fn get_results(
    pool: &PgPool,
    sport: Option<&str>,
    limit: i64,
) -> sqlx::Result<Vec<FixtureSummary>> {
    let sql = format!(
        "{SUMMARY_SELECT} WHERE r.fixture_id IS NOT NULL AND ($1::text IS NULL OR f.sport = $1) \
         ORDER BY f.kickoff_at DESC, f.id ASC LIMIT $2"
    );
    sqlx::query_as::<_, FixtureSummary>(&sql)
        .bind(sport)
        .bind(limit)
        .fetch_all(pool)
        .await
}

/// Fixtures with a live score and no final result yet.
pub async fn get_in_play(pool: &PgPool) -> sqlx::Result<Vec<FixtureSummary>> {
    let sql = format!(
        "{SUMMARY_SELECT} WHERE l.fixture_id IS NOT NULL AND r.fixture_id IS NULL \
         ORDER BY f.kickoff_at ASC, f.id ASC"
    );
    sqlx::query_as::<_, FixtureSummary>(&sql).fetch_all(pool).await
}

pub async fn get_fixture_summary(
    pool: &PgPool,
    fixture_id: Uuid,
) -> sqlx::Result<Option<FixtureSummary>> {
    let sql = format!("{SUMMARY_SELECT} WHERE f.id = $1");
    sqlx::query_as::<_, FixtureSummary>(&sql)
        .bind(fixture_id)
        .fetch_optional(pool)
        .await
}

/// Record the final score. A fixture has at most one result.
pub async fn insert_result(
    pool: &PgPool,
    fixture_id: Uuid,
    home_score: i32,
    away_score: i32,
) -> sqlx::Result<Option<FixtureResult>> {
    sqlx::query_as::<_, FixtureResult>(
        r#"
        INSERT INTO fixture_results (fixture_id, home_score, away_score)
        VALUES ($1, $2, $3)
        ON CONFLICT (fixture_id) DO NOTHING
        RETURNING *
        "#,
    )
    .bind(fixture_id)
    .bind(home_score)
    .bind(away_score)
    .fetch_optional(pool)
    .await
}

pub async fn get_result(pool: &PgPool, fixture_id: Uuid) -> sqlx::Result<Option<FixtureResult>> {
    sqlx::query_as::<_, FixtureResult>("SELECT * FROM fixture_results WHERE fixture_id = $1")
        .bind(fixture_id)
        .fetch_optional(pool)
        .await
}

pub async fn upsert_live_score(
    pool: &PgPool,
    fixture_id: Uuid,
    home_score: i32,
    away_score: i32,
    status: &str,
) -> sqlx::Result<LiveScore> {
    sqlx::query_as::<_, LiveScore>(
        r#"
        INSERT INTO live_scores (fixture_id, home_score, away_score, status)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (fixture_id) DO UPDATE
            SET home_score = $2, away_score = $3, status = $4, updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(fixture_id)
    .bind(home_score)
    .bind(away_score)
    .bind(status)
    .fetch_one(pool)
    .await
}

pub async fn upsert_odds(
    pool: &PgPool,
    fixture_id: Uuid,
    home_odds: Decimal,
    away_odds: Decimal,
    draw_odds: Decimal,
) -> sqlx::Result<FixtureOdds> {
    sqlx::query_as::<_, FixtureOdds>(
        r#"
        INSERT INTO fixture_odds (fixture_id, home_odds, away_odds, draw_odds)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (fixture_id) DO UPDATE
            SET home_odds = $2, away_odds = $3, draw_odds = $4, updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(fixture_id)
    .bind(home_odds)
    .bind(away_odds)
    .bind(draw_odds)
    .fetch_one(pool)
    .await
}

pub async fn get_odds(pool: &PgPool, fixture_id: Uuid) -> sqlx::Result<Option<FixtureOdds>> {
    sqlx::query_as::<_, FixtureOdds>("SELECT * FROM fixture_odds WHERE fixture_id = $1")
        .bind(fixture_id)
        .fetch_optional(pool)
        .await
}
