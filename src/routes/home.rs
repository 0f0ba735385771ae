//! Site-level pages rendered by this server.

use askama::Template;
use axum::{
    extract::{Request, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::AppState;
use crate::error::AppError;
use crate::ui::pages::{HomePage, NotFoundPage};

/// GET / - Home page with the anchor sections the navigation scrolls to.
pub async fn home(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    Ok(Html(HomePage::new(&state.config.site.owner_name).render()?))
}

/// Fallback for every unrouted path: a file from `site.public_dir`
/// (`/work`, stylesheets, images), else the 404 page.
pub async fn static_or_not_found(State(state): State<AppState>, request: Request) -> Response {
    let uri = request.uri().clone();
    let Ok(response) = ServeDir::new(&state.config.site.public_dir)
        .oneshot(request)
        .await;

    if response.status() == StatusCode::NOT_FOUND {
        return not_found(&state, &uri);
    }
    response.into_response()
}

fn not_found(state: &AppState, uri: &Uri) -> Response {
    tracing::debug!(path = %uri.path(), "No route or file");
    match NotFoundPage::new(&state.config.site.owner_name, uri.path()).render() {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

/// GET /healthz
pub async fn health() -> &'static str {
    "ok"
}
