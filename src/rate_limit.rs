//! Per-viewer rate limiting for state-changing requests.

use std::fmt;
use std::num::NonZeroU32;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use governor::{DefaultDirectRateLimiter, DefaultKeyedRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;

use crate::AppState;
use crate::viewer::{Viewer, ViewerId};

/// Token bucket per viewer cookie, plus one shared bucket for requests
/// that arrive without a cookie.
///
/// A client that drops its cookie is minted a new id on every request, so
/// such requests never get a bucket of their own.
pub struct ViewerRateLimiter {
    limiter: DefaultKeyedRateLimiter<ViewerId>,
    anonymous: DefaultDirectRateLimiter,
}

impl ViewerRateLimiter {
    /// Zero values fall back to one request per second and a burst equal
    /// to the rate.
    #[must_use]
    pub fn new(requests_per_second: u32, burst_size: u32) -> Self {
        let rate = NonZeroU32::new(requests_per_second).unwrap_or(nonzero!(1u32));
        let burst = NonZeroU32::new(burst_size).unwrap_or(rate);
        let quota = Quota::per_second(rate).allow_burst(burst);
        Self {
            limiter: RateLimiter::keyed(quota),
            anonymous: RateLimiter::direct(quota),
        }
    }

    /// Take one token for `viewer`. Returns false when the bucket is empty.
    pub fn check(&self, viewer: ViewerId) -> bool {
        self.limiter.check_key(&viewer).is_ok()
    }

    /// Take one token from the bucket shared by all cookieless requests.
    pub fn check_anonymous(&self) -> bool {
        self.anonymous.check().is_ok()
    }

    /// Check a request's viewer, routing freshly minted ids to the shared bucket.
    pub fn check_viewer(&self, viewer: &Viewer) -> bool {
        if viewer.is_new {
            self.check_anonymous()
        } else {
            self.check(viewer.id)
        }
    }

    /// Forget viewers whose buckets have refilled.
    pub fn prune(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    #[must_use]
    pub fn tracked_viewers(&self) -> usize {
        self.limiter.len()
    }
}

impl fmt::Debug for ViewerRateLimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewerRateLimiter")
            .field("tracked_viewers", &self.tracked_viewers())
            .finish()
    }
}

/// Reject writes from a viewer that exceeded its quota.
///
/// Reads (`GET`, `HEAD` and other safe methods) are never limited. Must run
/// after the viewer middleware has attached a [`Viewer`].
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if state.config.resilience.rate_limit_enabled && !req.method().is_safe() {
        if let Some(viewer) = req.extensions().get::<Viewer>() {
            if !state.rate_limiter.check_viewer(viewer) {
                tracing::warn!(
                    viewer_id = %viewer.id,
                    new_viewer = viewer.is_new,
                    method = %req.method(),
                    path = %req.uri().path(),
                    "Rate limit exceeded"
                );
                return Err(StatusCode::TOO_MANY_REQUESTS);
            }
        }
    }
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_then_reject() {
        let limiter = ViewerRateLimiter::new(1, 3);
        let viewer = ViewerId::new();

        assert!(limiter.check(viewer));
        assert!(limiter.check(viewer));
        assert!(limiter.check(viewer));
        assert!(!limiter.check(viewer));
    }

    #[test]
    fn test_viewers_have_separate_buckets() {
        let limiter = ViewerRateLimiter::new(1, 1);
        let a = ViewerId::new();
        let b = ViewerId::new();

        assert!(limiter.check(a));
        assert!(!limiter.check(a));
        assert!(limiter.check(b));
        assert_eq!(limiter.tracked_viewers(), 2);
    }

    #[test]
    fn test_new_viewers_share_one_bucket() {
        let limiter = ViewerRateLimiter::new(1, 2);
        let fresh = || Viewer {
            id: ViewerId::new(),
            is_new: true,
        };

        assert!(limiter.check_viewer(&fresh()));
        assert!(limiter.check_viewer(&fresh()));
        assert!(!limiter.check_viewer(&fresh()));
        // Nothing is keyed for cookieless requests.
        assert_eq!(limiter.tracked_viewers(), 0);

        let known = Viewer {
            id: ViewerId::new(),
            is_new: false,
        };
        assert!(limiter.check_viewer(&known));
    }

    #[test]
    fn test_zero_quota_still_admits_one() {
        let limiter = ViewerRateLimiter::new(0, 0);
        let viewer = ViewerId::new();
        assert!(limiter.check(viewer));
        assert!(!limiter.check(viewer));
    }
}
