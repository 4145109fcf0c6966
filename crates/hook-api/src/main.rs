//! Webhook logger: capture any request under /wh/*, browse captures at /ui.

use hook_api::config::ServerConfig;
use hook_api::server::{self, AppState};
use hook_store::InMemoryCaptureStore;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let store: Arc<dyn hook_types::CaptureStore + Send + Sync> =
        Arc::new(InMemoryCaptureStore::new(config.max_records));
    match config.max_records {
        Some(max) => tracing::info!(max_records = max.get(), "retaining the most recent webhooks"),
        None => tracing::info!("retaining every webhook (no HOOK_MAX_RECORDS set)"),
    }

    let app = server::router(Arc::new(AppState::new(store)));
    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    tracing::info!("Webhook logger started on http://localhost:{}", config.port);
    tracing::info!("Send webhooks to /wh/* endpoint on this server");
    tracing::info!("View the web UI at http://localhost:{}/ui", config.port);
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
