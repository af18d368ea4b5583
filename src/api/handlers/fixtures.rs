use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::{fixture_repo, sport_repo};
use crate::errors::AppError;
use crate::ledger::{self, validate_odds};
use crate::models::{Fixture, FixtureOdds, FixtureSettlement, FixtureSummary, LiveScore, Team};
use crate::AppState;

use super::ApiResponse;

const DEFAULT_FIXTURE_LIMIT: i64 = 50;
const MAX_FIXTURE_LIMIT: i64 = 200;

#[derive(Deserialize)]
pub struct FixtureQuery {
    pub sport: Option<String>,
    pub limit: Option<i64>,
}

impl FixtureQuery {
    fn sport(&self) -> Option<String> {
        self.sport
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
    }

    fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_FIXTURE_LIMIT)
            .clamp(1, MAX_FIXTURE_LIMIT)
    }
}

#[derive(Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
    pub sport: String,
}

#[derive(Deserialize)]
pub struct CreateFixtureRequest {
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub kickoff_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct OddsRequest {
    pub home_odds: Decimal,
    pub away_odds: Decimal,
    pub draw_odds: Decimal,
}

#[derive(Deserialize)]
pub struct LiveScoreRequest {
    pub home_score: i32,
    pub away_score: i32,
    pub status: String,
}

#[derive(Deserialize)]
pub struct ResultRequest {
    pub home_score: i32,
    pub away_score: i32,
}

async fn require_sport(state: &AppState, sport: &str) -> Result<(), AppError> {
    if !sport_repo::sport_exists(&state.db, sport).await? {
        return Err(AppError::BadRequest(format!("unknown sport: {sport}")));
    }
    Ok(())
}

async fn require_fixture(state: &AppState, id: Uuid) -> Result<Fixture, AppError> {
    fixture_repo::get_fixture(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("fixture not found".into()))
}

fn check_scores(home_score: i32, away_score: i32) -> Result<(), AppError> {
    if home_score < 0 || away_score < 0 {
        return Err(AppError::BadRequest("scores must not be negative".into()));
    }
    Ok(())
}

/// POST /api/teams
pub async fn create_team(
    State(state): State<AppState>,
    Json(body): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Team>>), AppError> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("team name must not be empty".into()));
    }

    let sport = body.sport.trim().to_lowercase();
    require_sport(&state, &sport).await?;

    match fixture_repo::insert_team(&state.db, name, &sport).await {
        Ok(team) => Ok((StatusCode::CREATED, Json(ApiResponse::ok(team)))),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            Err(AppError::Conflict(format!("team {name} already exists")))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /api/teams?sport=tennis
pub async fn list_teams(
    State(state): State<AppState>,
    Query(query): Query<FixtureQuery>,
) -> Result<Json<ApiResponse<Vec<Team>>>, AppError> {
    let sport = query
        .sport()
        .ok_or_else(|| AppError::BadRequest("sport is required".into()))?;
    require_sport(&state, &sport).await?;

    let teams = fixture_repo::get_teams_by_sport(&state.db, &sport).await?;
    Ok(Json(ApiResponse::ok(teams)))
}

/// POST /api/fixtures — schedule a match between two teams of one sport
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateFixtureRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Fixture>>), AppError> {
    if body.home_team_id == body.away_team_id {
        return Err(AppError::BadRequest("a team cannot play itself".into()));
    }

    let home = fixture_repo::get_team(&state.db, body.home_team_id)
        .await?
        .ok_or_else(|| AppError::BadRequest("home team not found".into()))?;
    let away = fixture_repo::get_team(&state.db, body.away_team_id)
        .await?
        .ok_or_else(|| AppError::BadRequest("away team not found".into()))?;

    if home.sport != away.sport {
        return Err(AppError::BadRequest(format!(
            "teams play different sports: {} vs {}",
            home.sport, away.sport
        )));
    }

    let fixture =
        fixture_repo::insert_fixture(&state.db, &home.sport, home.id, away.id, body.kickoff_at)
            .await?;

    tracing::info!(
        fixture_id = %fixture.id,
        sport = %fixture.sport,
        home = %home.name,
        away = %away.name,
        "Fixture created"
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(fixture))))
}

/// GET /api/fixtures?sport=&limit= — upcoming and in-play fixtures
pub async fn upcoming(
    State(state): State<AppState>,
    Query(query): Query<FixtureQuery>,
) -> Result<Json<ApiResponse<Vec<FixtureSummary>>>, AppError> {
    let sport = query.sport();
    if let Some(sport) = &sport {
        require_sport(&state, sport).await?;
    }

    let rows = fixture_repo::get_upcoming_fixtures(&state.db, sport.as_deref(), query.limit()).await?;
    Ok(Json(ApiResponse::ok(rows)))
}

/// GET /api/fixtures/results?sport=&limit= — finished fixtures, latest first
pub async fn results(
    State(state): State<AppState>,
    Query(query): Query<FixtureQuery>,
) -> Result<Json<ApiResponse<Vec<FixtureSummary>>>, AppError> {
    let sport = query.sport();
    if let Some(sport) = &sport {
        require_sport(&state, sport).await?;
    }

    let rows = fixture_repo::get_results(&state.db, sport.as_deref(), query.limit()).await?;
    Ok(Json(ApiResponse::ok(rows)))
}

/// GET /api/fixtures/live — fixtures with a live score and no result
pub async fn live(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<FixtureSummary>>>, AppError> {
    let rows = fixture_repo::get_in_play(&state.db).await?;
    Ok(Json(ApiResponse::ok(rows)))
}

/// GET /api/fixtures/{id}
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<FixtureSummary>>, AppError> {
    let summary = fixture_repo::get_fixture_summary(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("fixture not found".into()))?;

    Ok(Json(ApiResponse::ok(summary)))
}

/// PUT /api/fixtures/{id}/odds — quote home/away/draw prices
pub async fn set_odds(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<OddsRequest>,
) -> Result<Json<ApiResponse<FixtureOdds>>, AppError> {
    for odds in [body.home_odds, body.away_odds, body.draw_odds] {
        validate_odds(odds)?;
    }

    require_fixture(&state, id).await?;
    if fixture_repo::get_result(&state.db, id).await?.is_some() {
        return Err(AppError::Conflict("fixture already has a result".into()));
    }

    let odds =
        fixture_repo::upsert_odds(&state.db, id, body.home_odds, body.away_odds, body.draw_odds)
            .await?;

    tracing::info!(
        fixture_id = %id,
        home_odds = %odds.home_odds,
        away_odds = %odds.away_odds,
        draw_odds = %odds.draw_odds,
        "Odds updated"
    );

    Ok(Json(ApiResponse::ok(odds)))
}

/// PUT /api/fixtures/{id}/live — in-play score update
pub async fn set_live_score(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<LiveScoreRequest>,
) -> Result<Json<ApiResponse<LiveScore>>, AppError> {
    check_scores(body.home_score, body.away_score)?;

    let status = body.status.trim();
    if status.is_empty() {
        return Err(AppError::BadRequest("status must not be empty".into()));
    }

    require_fixture(&state, id).await?;

    let score =
        fixture_repo::upsert_live_score(&state.db, id, body.home_score, body.away_score, status)
            .await?;

    Ok(Json(ApiResponse::ok(score)))
}

/// POST /api/fixtures/{id}/result — record the final score and settle its tips
pub async fn record_result(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ResultRequest>,
) -> Result<Json<ApiResponse<FixtureSettlement>>, AppError> {
    check_scores(body.home_score, body.away_score)?;

    let settlement = ledger::record_result(&state.db, id, body.home_score, body.away_score).await?;
    Ok(Json(ApiResponse::ok(settlement)))
}

/// POST /api/fixtures/{id}/settle — retry settlement of still-pending tips
pub async fn settle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<FixtureSettlement>>, AppError> {
    let settlement = ledger::settle_fixture(&state.db, id).await?;
    Ok(Json(ApiResponse::ok(settlement)))
}
