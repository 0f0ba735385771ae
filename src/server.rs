//! Router assembly and the server lifecycle.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::IntoResponse,
    routing::{get, post},
};
use tokio::signal;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::rate_limit::rate_limit_middleware;
use crate::routes::{api, chat, home};
use crate::viewer::viewer_middleware;
use crate::AppState;

/// Build the application router for `state`.
///
/// Middleware order, outermost first: trace, timeout, viewer cookie, rate limit.
pub fn build_router(state: AppState) -> Router {
    let resilience = &state.config.resilience;
    // A disabled timeout is a very long one so the layer stack keeps one type.
    let timeout_duration = if resilience.timeout_disabled {
        Duration::from_secs(365 * 24 * 60 * 60)
    } else {
        Duration::from_secs(resilience.request_timeout_secs)
    };

    Router::new()
        .route("/", get(home::home))
        .route("/healthz", get(home::health))
        .route("/chat", get(chat::new_chat))
        .route("/chat/{id}", get(chat::show_chat))
        .route("/chat/{id}/header", get(chat::header_fragment))
        .route("/chat/{id}/visibility", post(chat::update_visibility))
        .route("/chat/{id}/messages", post(chat::post_message))
        .route("/ui/sidebar", post(chat::toggle_sidebar))
        .nest("/api", api::router())
        .fallback(home::static_or_not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            viewer_middleware,
        ))
        .layer(middleware::from_fn(move |req: Request, next: Next| {
            let duration = timeout_duration;
            async move {
                match tokio::time::timeout(duration, next.run(req)).await {
                    Ok(res) => res,
                    Err(_) => (StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response(),
                }
            }
        }))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Periodically evict idle sessions and stale rate-limit buckets.
fn spawn_cleanup(state: AppState) -> JoinHandle<()> {
    tokio::spawn(async move {
        let session = &state.config.session;
        let mut ticker = tokio::time::interval(session.cleanup_interval());
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = state
                .sessions
                .cleanup_expired(session.idle_timeout(), session.empty_session_ttl());
            state.rate_limiter.prune();
            if removed > 0 {
                info!(
                    removed,
                    remaining = state.sessions.len(),
                    "Evicted expired chat sessions"
                );
            }
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
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
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let state = AppState::new(Arc::clone(&config));
    let cleanup = spawn_cleanup(state.clone());
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        owner = %config.site.owner_name,
        rate_limit_enabled = config.resilience.rate_limit_enabled,
        "Server started"
    );

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    cleanup.abort();
    info!(name: "server.stopped", "Server stopped");
    Ok(())
}
