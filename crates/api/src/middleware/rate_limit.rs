//! Rate limiting for public, unauthenticated endpoints.
//!
//! Slug lookups are public and may mint invites; they are limited per
//! client address. The address is the socket peer unless
//! `security.trust_forwarded_for` says a proxy in front of the service sets
//! the forwarding headers.

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    clock::{Clock, DefaultClock},
    state::keyed::DefaultKeyedStateStore,
    Quota, RateLimiter,
};
use std::{
    net::SocketAddr,
    num::NonZeroU32,
    sync::{Arc, Weak},
    time::Duration,
};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::app::AppState;
use crate::error::ApiError;

type KeyedLimiter = RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>;

/// How often idle client entries are dropped from the limiter.
pub const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Per-client limiter shared by all lookup requests.
pub struct LookupRateLimiter {
    limiter: KeyedLimiter,
    clock: DefaultClock,
    per_minute: NonZeroU32,
}

impl LookupRateLimiter {
    /// Returns `None` when `per_minute` is 0 (limiting disabled).
    pub fn new(per_minute: u32) -> Option<Self> {
        let per_minute = NonZeroU32::new(per_minute)?;
        Some(Self {
            limiter: RateLimiter::keyed(Quota::per_minute(per_minute)),
            clock: DefaultClock::default(),
            per_minute,
        })
    }

    /// `Err` carries the retry-after delay in whole seconds (at least 1).
    pub fn check(&self, client: &str) -> Result<(), u64> {
        self.limiter
            .check_key(&client.to_string())
            .map_err(|not_until| not_until.wait_time_from(self.clock.now()).as_secs().max(1))
    }

    pub fn per_minute(&self) -> u32 {
        self.per_minute.get()
    }

    /// Number of clients currently holding limiter state.
    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }

    /// Drops clients whose quota has fully replenished.
    pub fn prune(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    /// Prunes the limiter every `every` until it is dropped.
    ///
    /// Returns `None` outside a Tokio runtime.
    pub fn spawn_cleanup(limiter: &Arc<Self>, every: Duration) -> Option<JoinHandle<()>> {
        let handle = tokio::runtime::Handle::try_current().ok()?;
        let limiter: Weak<Self> = Arc::downgrade(limiter);

        Some(handle.spawn(async move {
            let mut interval = tokio::time::interval(every);
            // Skip the first immediate tick
            interval.tick().await;

            loop {
                interval.tick().await;
                let Some(limiter) = limiter.upgrade() else {
                    break;
                };
                limiter.prune();
                debug!(
                    tracked_clients = limiter.tracked_clients(),
                    "Pruned lookup rate limiter"
                );
            }
        }))
    }
}

impl std::fmt::Debug for LookupRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupRateLimiter")
            .field("per_minute", &self.per_minute)
            .field("tracked_clients", &self.limiter.len())
            .finish()
    }
}

/// Identifies the caller.
///
/// Forwarding headers are only read when `trust_forwarded_for` is set. Then
/// the last `X-Forwarded-For` hop (the one the proxy appended) wins, then
/// `X-Real-IP`. Otherwise the socket peer is used, else `"unknown"`.
fn client_key(req: &Request<Body>, trust_forwarded_for: bool) -> String {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.rsplit(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    let forwarded = if trust_forwarded_for {
        header("x-forwarded-for").or_else(|| header("x-real-ip"))
    } else {
        None
    };

    forwarded
        .or_else(|| {
            req.extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

/// Rejects lookup requests over the per-client quota with 429.
pub async fn lookup_rate_limit_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(limiter) = state.lookup_rate_limiter.as_deref() {
        let client = client_key(&req, state.config.security.trust_forwarded_for);
        if let Err(retry_after_secs) = limiter.check(&client) {
            warn!(client = %client, retry_after_secs, "Slug lookup rate limited");
            return ApiError::RateLimited { retry_after_secs }.into_response();
        }
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(headers: &[(&str, &str)]) -> Request<Body> {
        let mut builder = Request::builder().uri("/api/v1/coach/lookup-slug?slug=x");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn with_peer(mut req: Request<Body>, peer: [u8; 4]) -> Request<Body> {
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from((peer, 4000))));
        req
    }

    #[test]
    fn test_zero_disables_limiting() {
        assert!(LookupRateLimiter::new(0).is_none());
    }

    #[test]
    fn test_limiter_exhaustion() {
        let limiter = LookupRateLimiter::new(2).unwrap();
        assert!(limiter.check("10.0.0.1").is_ok());
        assert!(limiter.check("10.0.0.1").is_ok());

        let retry_after = limiter.check("10.0.0.1").unwrap_err();
        assert!(retry_after >= 1);
    }

    #[test]
    fn test_clients_limited_independently() {
        let limiter = LookupRateLimiter::new(1).unwrap();
        assert!(limiter.check("10.0.0.1").is_ok());
        assert!(limiter.check("10.0.0.2").is_ok());
        assert!(limiter.check("10.0.0.1").is_err());
        assert!(limiter.check("10.0.0.2").is_err());
    }

    #[test]
    fn test_limiter_debug() {
        let limiter = LookupRateLimiter::new(30).unwrap();
        let debug = format!("{:?}", limiter);
        assert!(debug.contains("LookupRateLimiter"));
        assert!(debug.contains("30"));
        assert_eq!(limiter.per_minute(), 30);
    }

    #[test]
    fn test_forwarded_headers_ignored_by_default() {
        let req = with_peer(
            request(&[("x-forwarded-for", "203.0.113.7"), ("x-real-ip", "198.51.100.2")]),
            [192, 0, 2, 10],
        );
        assert_eq!(client_key(&req, false), "192.0.2.10");
    }

    #[test]
    fn test_rotating_forwarded_for_shares_one_quota() {
        let limiter = LookupRateLimiter::new(1).unwrap();

        let allowed = (0..500)
            .map(|i| {
                let spoofed = format!("10.{}.{}.1", i / 256, i % 256);
                let req = request(&[("x-forwarded-for", spoofed.as_str())]);
                client_key(&with_peer(req, [192, 0, 2, 10]), false)
            })
            .filter(|client| limiter.check(client).is_ok())
            .count();

        assert_eq!(allowed, 1);
        assert_eq!(limiter.tracked_clients(), 1);
    }

    #[test]
    fn test_trusted_forwarded_for_uses_proxy_appended_hop() {
        let req = with_peer(
            request(&[
                ("x-forwarded-for", "6.6.6.6, 203.0.113.7"),
                ("x-real-ip", "198.51.100.2"),
            ]),
            [10, 0, 0, 1],
        );
        assert_eq!(client_key(&req, true), "203.0.113.7");
    }

    #[test]
    fn test_trusted_falls_back_to_real_ip_then_peer() {
        let req = request(&[("x-real-ip", "198.51.100.2")]);
        assert_eq!(client_key(&req, true), "198.51.100.2");

        let req = with_peer(request(&[]), [192, 0, 2, 10]);
        assert_eq!(client_key(&req, true), "192.0.2.10");
    }

    #[test]
    fn test_client_key_unknown() {
        assert_eq!(client_key(&request(&[]), false), "unknown");
    }

    #[test]
    fn test_prune_keeps_throttled_clients() {
        let limiter = LookupRateLimiter::new(1).unwrap();
        assert!(limiter.check("10.0.0.1").is_ok());

        limiter.prune();

        assert_eq!(limiter.tracked_clients(), 1);
        assert!(limiter.check("10.0.0.1").is_err());
    }

    #[test]
    fn test_cleanup_needs_runtime() {
        let limiter = Arc::new(LookupRateLimiter::new(1).unwrap());
        assert!(LookupRateLimiter::spawn_cleanup(&limiter, CLEANUP_INTERVAL).is_none());
    }

    #[tokio::test]
    async fn test_cleanup_stops_when_limiter_dropped() {
        let limiter = Arc::new(LookupRateLimiter::new(1).unwrap());
        let handle =
            LookupRateLimiter::spawn_cleanup(&limiter, Duration::from_millis(10)).unwrap();

        drop(limiter);

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("cleanup task did not stop")
            .unwrap();
    }
}
