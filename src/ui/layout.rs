//! Per-request layout state: sidebar open flag and viewport width.
//!
//! Neither value lives on the server. The sidebar flag is a cookie owned by
//! the browser and the width comes from client hints or the `vw` query
//! parameter sent by the header's resize trigger.

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Query},
    http::{HeaderMap, request::Parts, uri::PathAndQuery},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;

use crate::AppState;

/// Cookie holding the sidebar open flag.
pub const SIDEBAR_COOKIE: &str = "sidebar_state";

/// Client-hint header carrying the layout viewport width.
pub const VIEWPORT_WIDTH_HINT: &str = "sec-ch-viewport-width";

const LEGACY_VIEWPORT_WIDTH_HINT: &str = "viewport-width";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutState {
    pub sidebar_open: bool,
    /// `None` until the browser has told us its width.
    pub viewport_width: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct ViewportQuery {
    vw: Option<u32>,
}

#[allow(clippy::cast_sign_loss)]
fn parse_width(value: &str) -> Option<u32> {
    let width: f64 = value.trim().parse().ok()?;
    // Widths are non-negative and far below u32::MAX.
    (width.is_finite() && width >= 0.0).then(|| width.floor() as u32)
}

fn hinted_width(headers: &HeaderMap) -> Option<u32> {
    [VIEWPORT_WIDTH_HINT, LEGACY_VIEWPORT_WIDTH_HINT]
        .into_iter()
        .filter_map(|name| headers.get(name))
        .filter_map(|value| value.to_str().ok())
        .find_map(parse_width)
}

/// Read the sidebar flag, falling back to `default_open`.
#[must_use]
pub fn sidebar_open(jar: &CookieJar, default_open: bool) -> bool {
    jar.get(SIDEBAR_COOKIE)
        .and_then(|c| c.value().parse::<bool>().ok())
        .unwrap_or(default_open)
}

#[must_use]
pub fn sidebar_cookie(open: bool) -> Cookie<'static> {
    Cookie::build((SIDEBAR_COOKIE, open.to_string()))
        .path("/")
        .same_site(SameSite::Lax)
        .permanent()
        .build()
}

fn is_same_site_path(path: &str) -> bool {
    // Browsers drop tabs and newlines, so "/\t/host" would become "//host".
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.chars().any(|c| c.is_control() || c == '\\')
        && path.parse::<PathAndQuery>().is_ok()
}

/// Only same-site absolute paths are allowed as redirect targets.
#[must_use]
pub fn safe_return_path(candidate: Option<&str>) -> &str {
    match candidate {
        Some(path) if is_same_site_path(path) => path,
        _ => "/chat",
    }
}

impl LayoutState {
    #[must_use]
    pub fn from_parts(parts: &Parts, default_open: bool) -> Self {
        let jar = CookieJar::from_headers(&parts.headers);
        let queried = Query::<ViewportQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(q)| q.vw);

        Self {
            sidebar_open: sidebar_open(&jar, default_open),
            viewport_width: queried.or_else(|| hinted_width(&parts.headers)),
        }
    }
}

impl FromRequestParts<AppState> for LayoutState {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts, state.config.ui.sidebar_default_open))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(uri: &str, headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_defaults_without_hints() {
        let state = LayoutState::from_parts(&parts("/chat", &[]), true);
        assert!(state.sidebar_open);
        assert_eq!(state.viewport_width, None);
    }

    #[test]
    fn test_cookie_and_client_hint() {
        let state = LayoutState::from_parts(
            &parts(
                "/chat",
                &[("cookie", "sidebar_state=false"), ("sec-ch-viewport-width", "1280")],
            ),
            true,
        );
        assert!(!state.sidebar_open);
        assert_eq!(state.viewport_width, Some(1280));
    }

    #[test]
    fn test_query_beats_header() {
        let state = LayoutState::from_parts(
            &parts("/chat/x/header?vw=500", &[("viewport-width", "1400.5")]),
            false,
        );
        assert_eq!(state.viewport_width, Some(500));
    }

    #[test]
    fn test_garbage_hints_ignored() {
        let state = LayoutState::from_parts(
            &parts(
                "/chat",
                &[("cookie", "sidebar_state=maybe"), ("sec-ch-viewport-width", "wide")],
            ),
            false,
        );
        assert!(!state.sidebar_open);
        assert_eq!(state.viewport_width, None);
    }

    #[test]
    fn test_safe_return_path() {
        assert_eq!(safe_return_path(Some("/chat/abc")), "/chat/abc");
        assert_eq!(safe_return_path(Some("//evil.example")), "/chat");
        assert_eq!(safe_return_path(Some("https://evil.example")), "/chat");
        assert_eq!(safe_return_path(None), "/chat");
        assert_eq!(safe_return_path(Some("/chat/abc?vw=500")), "/chat/abc?vw=500");
    }

    #[test]
    fn test_safe_return_path_rejects_control_characters() {
        assert_eq!(safe_return_path(Some("/\t/evil.example")), "/chat");
        assert_eq!(safe_return_path(Some("/\n/evil.example")), "/chat");
        assert_eq!(safe_return_path(Some("/chat\nX-Injected: 1")), "/chat");
        assert_eq!(safe_return_path(Some("/\\evil.example")), "/chat");
        assert_eq!(safe_return_path(Some("/chat with space")), "/chat");
    }
}
