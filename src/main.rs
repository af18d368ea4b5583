use tipster_arena::api::router::create_router;
use tipster_arena::config::AppConfig;
use tipster_arena::services::balance_reset::run_balance_reset;
use tipster_arena::{db, metrics, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    tracing::info!("Connecting to database...");
    let db = db::init_pool(&config.database_url, config.db_max_connections).await?;
    tracing::info!("Database connected");

    let metrics_handle = metrics::init_metrics()?;

    // --- Monthly balance reset ---
    if config.balance_reset_enabled {
        let reset_db = db.clone();
        let interval_secs = config.balance_reset_interval_secs;
        tokio::spawn(async move {
            run_balance_reset(reset_db, interval_secs).await;
        });
        tracing::info!(interval_secs, "Balance reset scheduler spawned");
    } else {
        tracing::info!("Balance reset scheduler disabled (BALANCE_RESET_ENABLED=false)");
    }

    let state = AppState {
        db,
        config,
        metrics_handle,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    if json_logs {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
