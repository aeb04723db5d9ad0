use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use mailcast::api::router::build_router;
use mailcast::api::AppState;
use mailcast::config::Config;
use mailcast::database::Database;
use mailcast::services::{BroadcastService, SmtpConfig, SmtpEmailProvider, TemplateStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mailcast=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Initialize database connection
    sqlx::any::install_default_drivers();
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connection established");

    // Run migrations
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations applied");

    // Build the template registry once; an invalid built-in set is a
    // deploy error, not something to limp past.
    let templates =
        Arc::new(TemplateStore::with_defaults().context("Invalid built-in template set")?);

    let smtp_config = SmtpConfig::from_env().context("Failed to load SMTP configuration")?;
    let provider = Arc::new(SmtpEmailProvider::new(smtp_config));

    let broadcast_service = BroadcastService::new(db, Arc::clone(&templates), provider);

    let state = AppState {
        templates,
        broadcast_service,
    };

    // Build router
    let app = build_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
