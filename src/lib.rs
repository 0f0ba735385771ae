//! Portfolio chat: the server-rendered chat shell of a personal portfolio site.
//!
//! Visitors get an anonymous viewer cookie and one chat session per visit to
//! `/chat`. Sessions are private until their owner shares them; anyone with
//! the link of a public session sees it read-only.
//!
//! # Modules
//!
//! - [`session`]: Chat ids, visibility, messages and the session store
//! - [`viewer`]: Anonymous viewer identity carried in a cookie
//! - [`ui`]: View models and askama templates for pages and fragments
//! - [`routes`]: HTML, HTMX fragment and JSON handlers
//! - [`server`]: Router assembly, middleware and lifecycle
//! - [`config`]: Layered configuration (defaults, file, env, CLI)

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::implicit_hasher)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]

pub mod config;
pub mod error;
pub mod rate_limit;
pub mod routes;
pub mod server;
pub mod session;
pub mod telemetry;
pub mod ui;
pub mod viewer;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::rate_limit::ViewerRateLimiter;
use crate::session::SessionStore;

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Session store for conversation management.
    pub sessions: SessionStore,
    /// Per-viewer limiter for state-changing requests.
    pub rate_limiter: Arc<ViewerRateLimiter>,
    /// Global Configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(config: Arc<AppConfig>) -> Self {
        let resilience = &config.resilience;
        let rate_limiter = Arc::new(ViewerRateLimiter::new(
            resilience.requests_per_second,
            resilience.burst_size,
        ));
        Self {
            sessions: SessionStore::new(),
            rate_limiter,
            config,
        }
    }
}
