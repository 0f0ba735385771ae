//! Structured logging setup: env filter plus a compact or JSON fmt layer.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogConfig;

/// Initialize structured logging.
///
/// `RUST_LOG` controls levels; without it the crate logs at debug and
/// everything else at info. `log.json` switches the output to JSON lines.
pub fn init(config: &LogConfig) {
    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,portfolio_chat=debug,tower_http=info"));

    let registry = tracing_subscriber::registry().with(filter_layer);

    if config.json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(false),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_line_number(true)
                    .compact(),
            )
            .init();
    }
}
