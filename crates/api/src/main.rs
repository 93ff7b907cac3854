use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use microgreens_api::background::Scheduler;
use microgreens_api::config::ServerConfig;
use microgreens_api::engine::GardenEngine;
use microgreens_api::router::build_app_router;
use microgreens_api::state::AppState;
use microgreens_events::{EventBus, EventLogger, NotifyRegistry, NotifyTarget, Notifier, WebhookRegistry};
use microgreens_store::{GardenStore, JsonFileStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "microgreens_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "Microgreens service failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Event bus ---
    let event_bus = Arc::new(EventBus::default());
    let logger_handle = tokio::spawn(EventLogger::run(event_bus.subscribe()));

    // --- Garden ---
    let backend = Arc::new(JsonFileStore::new(&config.data_path));
    let store = GardenStore::new(backend);
    store.health_check().await?;
    let engine = Arc::new(GardenEngine::start(store, Arc::clone(&event_bus)).await?);
    tracing::info!(
        data_path = %config.data_path,
        calendar = %config.garden.calendar_entity,
        "Garden engine started"
    );

    // --- Notifications ---
    let notifier = build_notifier(&config)?;

    // --- Scheduler ---
    let scheduler = Scheduler::start(Arc::clone(&engine), notifier, &config.garden);

    // --- Router ---
    let state = AppState {
        engine: Arc::clone(&engine),
        config: Arc::new(config.clone()),
        event_bus: Arc::clone(&event_bus),
    };
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(config.host.parse()?, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    scheduler.shutdown().await;

    // Dropping every bus handle closes the channel and stops the logger.
    drop(engine);
    drop(event_bus);
    let _ = tokio::time::timeout(Duration::from_secs(5), logger_handle).await;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Build the job notifier over the configured webhook channels.
fn build_notifier(config: &ServerConfig) -> Result<Notifier, Box<dyn std::error::Error>> {
    let target = &config.garden.notify_service;
    let provider = NotifyTarget::parse(target)
        .map(|t| t.provider)
        .unwrap_or_else(|| "notify".to_string());

    let mut registry = WebhookRegistry::new(provider)?;
    for (name, url) in &config.notify_webhooks {
        registry = registry.with_channel(name, url);
    }

    if NotifyTarget::parse(target)
        .is_some_and(|t| !registry.has_channel(&t.provider, &t.name))
    {
        tracing::warn!(
            target = %target,
            channels = registry.channel_count(),
            "Notify service has no configured webhook, notifications will be skipped"
        );
    }

    Ok(Notifier::new(Arc::new(registry), target.clone()))
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
