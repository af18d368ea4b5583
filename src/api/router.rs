use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;
use super::auth::require_auth;
use super::handlers;

pub fn create_router(state: AppState) -> Router {
    // Public routes — no authentication required
    let public = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render));

    // Ledger API — requires Bearer token when API_TOKEN is set
    let protected = Router::new()
        // Accounts
        .route("/api/accounts", post(handlers::accounts::create))
        .route("/api/accounts/:id", get(handlers::accounts::detail))
        .route("/api/accounts/:id/stats", get(handlers::accounts::stats))
        .route(
            "/api/accounts/:id/tips",
            get(handlers::accounts::tips).post(handlers::accounts::place_tip),
        )
        .route("/api/accounts/:id/reset", post(handlers::accounts::reset))
        // Followers
        .route(
            "/api/accounts/:id/follow",
            post(handlers::followers::follow).delete(handlers::followers::unfollow),
        )
        .route("/api/accounts/:id/followers", get(handlers::followers::followers))
        .route("/api/accounts/:id/following", get(handlers::followers::following))
        // Tips
        .route("/api/tips/latest", get(handlers::tips::latest))
        .route("/api/tips/:id", get(handlers::tips::detail))
        .route("/api/tips/:id/settle", post(handlers::tips::settle))
        // Leaderboard
        .route("/api/leaderboard", get(handlers::leaderboard::list))
        .route("/api/sports", get(handlers::sports::list))
        // Fixtures
        .route(
            "/api/teams",
            get(handlers::fixtures::list_teams).post(handlers::fixtures::create_team),
        )
        .route(
            "/api/fixtures",
            get(handlers::fixtures::upcoming).post(handlers::fixtures::create),
        )
        .route("/api/fixtures/results", get(handlers::fixtures::results))
        .route("/api/fixtures/live", get(handlers::fixtures::live))
        .route("/api/fixtures/:id", get(handlers::fixtures::detail))
        .route("/api/fixtures/:id/odds", put(handlers::fixtures::set_odds))
        .route("/api/fixtures/:id/live", put(handlers::fixtures::set_live_score))
        .route("/api/fixtures/:id/result", post(handlers::fixtures::record_result))
        .route("/api/fixtures/:id/settle", post(handlers::fixtures::settle))
        // Chat
        .route("/api/chat", get(handlers::chat::list).post(handlers::chat::post))
        .layer(middleware::from_fn(require_auth));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
