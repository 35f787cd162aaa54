use std::sync::Arc;

use tracing::info;

use crate::adapters::SupabaseClient;
use crate::config::SiteConfig;
use crate::server::routes::{self, AppState};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("shutdown signal received");
}

/// Public entry: build the app and run the HTTP server until Ctrl-C.
pub async fn run(config: SiteConfig) -> anyhow::Result<()> {
    let service = Arc::new(SupabaseClient::from_config(&config));
    let state = AppState::new(service, &config);
    let app = routes::build_router(state);

    let addr = config.bind_addr()?;
    info!(%addr, service = %config.service_url, "starting site server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
