//! Portfolio chat server.

use std::sync::Arc;

use dotenvy::dotenv;
use mimalloc::MiMalloc;

use portfolio_chat::{config::AppConfig, server, telemetry};

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present)
    let _ = dotenv();

    let config = AppConfig::load()?;
    telemetry::init(&config.log);

    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        public_dir = %config.site.public_dir,
        "Configuration loaded"
    );

    server::start_server(Arc::new(config)).await
}
