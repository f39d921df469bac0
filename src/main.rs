//! # TimeSync Main Entry Point
//!
//! Initializes logging, loads configuration, sets up the database,
//! starts the reminder service, and serves the HTTP API.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use timesync::api::{self, ApiSettings, AppState};
use timesync::config::Config;
use timesync::database::connection::DatabaseManager;
use timesync::services::{messaging::MessagingService, reminder::ReminderService};
use timesync::utils::logging::log_system_event;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "timesync=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting TimeSync v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded - Database: {}, HTTP Port: {}, Working hours: {}:00-{}:00",
        config.database_url,
        config.http_port,
        config.working_hours.start_hour(),
        config.working_hours.end_hour()
    );

    info!("Initializing database connection...");
    let db_manager = DatabaseManager::new(&config.database_url).await?;
    db_manager.run_migrations().await?;
    let db = Arc::new(db_manager);
    info!("Database initialized successfully");

    let messaging = MessagingService::from_config(&config);
    info!("Messages will be delivered via {}", messaging.channel_name());

    let mut reminder_service = ReminderService::new(messaging.clone(), db.clone())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create reminder service: {}", e))?;
    if let Err(e) = reminder_service.start().await {
        tracing::error!("Failed to start reminder service: {}", e);
    }

    let state = AppState::new(db, messaging, ApiSettings::from(&config));
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("HTTP server listening on port {}", config.http_port);

    let server = axum::serve(listener, api::router(state)).with_graceful_shutdown(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            log_system_event("Shutdown signal received", None);
        }
    });
    if let Err(e) = server.await {
        tracing::error!("HTTP server error: {}", e);
    }

    if let Err(e) = reminder_service.stop().await {
        tracing::warn!("Error stopping reminder service: {}", e);
    }

    info!("Application stopped");
    Ok(())
}
