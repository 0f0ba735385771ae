//! Viewer identity.
//!
//! Every browser gets a long-lived `viewer_id` cookie. Session ownership is
//! decided by comparing that id with the id recorded when a session was
//! allocated.

use std::fmt;
use std::str::FromStr;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AppState;

/// Cookie holding the viewer id.
pub const VIEWER_COOKIE: &str = "viewer_id";

/// Identifier of a browser/visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewerId(Uuid);

impl ViewerId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ViewerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ViewerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ViewerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// The viewer behind the current request.
#[derive(Clone, Copy, Debug)]
pub struct Viewer {
    pub id: ViewerId,
    /// True when the id was minted for this request.
    pub is_new: bool,
}

fn viewer_cookie(id: ViewerId, secure: bool) -> Cookie<'static> {
    Cookie::build((VIEWER_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .permanent()
        .build()
}

/// Attach a [`Viewer`] to every request, minting one when the cookie is missing or malformed.
pub async fn viewer_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let existing = jar
        .get(VIEWER_COOKIE)
        .and_then(|c| c.value().parse::<ViewerId>().ok());

    let viewer = match existing {
        Some(id) => Viewer { id, is_new: false },
        None => {
            let id = ViewerId::new();
            tracing::debug!(viewer_id = %id, "Assigned new viewer id");
            Viewer { id, is_new: true }
        }
    };
    request.extensions_mut().insert(viewer);

    let response = next.run(request).await;
    if viewer.is_new {
        let jar = jar.add(viewer_cookie(viewer.id, state.config.cookies.secure));
        (jar, response).into_response()
    } else {
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_attributes() {
        let id = ViewerId::new();
        let cookie = viewer_cookie(id, true);

        assert_eq!(cookie.name(), VIEWER_COOKIE);
        assert_eq!(cookie.value(), id.to_string());
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }

    #[test]
    fn test_parse_rejects_tampered_value() {
        assert!("not-a-uuid".parse::<ViewerId>().is_err());
    }
}
