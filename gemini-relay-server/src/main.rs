//! Gemini Relay Server - Headless Daemon
//!
//! A pure Rust HTTP server that:
//! - Accepts chat payloads on POST /api/chat
//! - Forwards them to the Gemini `generateContent` API with the server-held key
//! - Relays the answer, or a translated error, back to the browser
//!
//! Access via: http://localhost:8045

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod cli;
mod cors;
mod router;
mod server_utils;

use cli::Cli;
use gemini_relay_core::ChatGateway;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🚀 Gemini Relay starting on port {}...", cli.port);

    let config = cli.gateway_config();
    if config.credential.is_none() {
        warn!("⚠️ GEMINI_API_KEY is not set; /api/chat will answer 500 until it is configured");
    }
    info!("🔀 Upstream endpoint: {}", config.endpoint_url());
    info!("⏱️ Upstream timeout: {}ms", config.timeout.as_millis());

    let shutdown = CancellationToken::new();
    let gateway = Arc::new(
        ChatGateway::new(config, shutdown.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize gateway: {}", e))?,
    );

    let app = router::build_router(gateway, &cli.allowed_origins);
    let listener = server_utils::create_listener(&cli.host, cli.port).await?;

    info!("🌐 Server listening on http://{}:{}", cli.host, cli.port);
    info!("💬 Chat endpoint at http://{}:{}/api/chat", cli.host, cli.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(server_utils::shutdown_signal(shutdown))
        .await?;

    info!("👋 Server stopped");
    Ok(())
}
