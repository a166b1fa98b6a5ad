use anyhow::Context;
use tracing_subscriber::EnvFilter;

use salary_survey_api::config;
use salary_survey_api::database::{DatabaseManager, SqlRepository};
use salary_survey_api::is_production;
use salary_survey_api::server::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SALARY_API_PORT, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::config();
    tracing::info!("Starting salary survey API in {:?} mode", config.environment);
    if is_production!() && config.api.enable_diagnostics {
        tracing::warn!("Diagnostic lookup routes are enabled in production");
    }

    let pool = DatabaseManager::connect(&config.database)
        .await
        .with_context(|| format!("failed to open database {}", config.database.url))?;
    DatabaseManager::ensure_schema(&pool)
        .await
        .context("failed to create database tables")?;

    let state = AppState::from_repository(SqlRepository::new(pool.clone()));
    let app = server::app(state, &config.api);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Salary survey API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    tracing::info!("Closed database pool");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
