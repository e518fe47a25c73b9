mod backend;
mod config;
mod errors;
mod models;
mod routes;
mod service;

use tracing::info;

use crate::backend::BackendClient;
use crate::config::{AppConfig, Environment};
use crate::routes::build_router;
use crate::service::relay_service::RelayService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Initialise tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meeting_notes_relay=debug,tower_http=debug".into()),
        )
        .init();

    // ── Configuration ─────────────────────────────────────────────────────────
    let config = AppConfig::from_env()?;
    if config.environment == Environment::Development {
        info!("Development mode (set APP_ENV=production to require BACKEND_URL)");
    }
    if let Some(dir) = &config.static_dir {
        info!("Serving frontend from {dir}");
    }

    // ── Dependency wiring ─────────────────────────────────────────────────────
    let backend = BackendClient::new(&config.backend_url);
    let relay_service = RelayService::new(backend);
    info!("Relaying to backend at {}", relay_service.backend().base_url());

    // ── Router ────────────────────────────────────────────────────────────────
    let app = build_router(relay_service, &config);

    // ── Listen ────────────────────────────────────────────────────────────────
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{addr}/");

    axum::serve(listener, app).await?;
    Ok(())
}
