use axum::{middleware, routing::get, Router};
use shared::jwt::SessionTokenConfig;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{error, warn};

use crate::config::Config;
use crate::middleware::rate_limit::CLEANUP_INTERVAL;
use crate::middleware::{
    lookup_rate_limit_middleware, metrics_handler, metrics_middleware,
    security_headers_middleware, trace_id, LookupRateLimiter,
};
use crate::routes::{coach_invites, coach_lookup, coach_settings, health};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    /// `None` when the JWT keys are unusable; every request is then anonymous.
    pub session_tokens: Option<Arc<SessionTokenConfig>>,
    pub lookup_rate_limiter: Option<Arc<LookupRateLimiter>>,
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        // Development default
        layer.allow_origin(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let session_tokens = match config.jwt.session_tokens() {
        Ok(tokens) => Some(Arc::new(tokens)),
        Err(e) => {
            error!(error = %e, "Session token keys unusable; all requests are anonymous");
            None
        }
    };

    let lookup_rate_limiter =
        LookupRateLimiter::new(config.security.lookup_rate_limit_per_minute).map(Arc::new);
    if let Some(limiter) = &lookup_rate_limiter {
        if LookupRateLimiter::spawn_cleanup(limiter, CLEANUP_INTERVAL).is_none() {
            warn!("No Tokio runtime; lookup rate limiter will not be pruned");
        }
    }

    let state = AppState {
        pool,
        config: config.clone(),
        session_tokens,
        lookup_rate_limiter,
    };

    // Session-scoped coach routes. The OptionalSession extractor resolves the
    // bearer token; handlers answer 401/403 themselves.
    let coach_routes = Router::new()
        .route(
            "/api/v1/coach/settings",
            get(coach_settings::get_settings).put(coach_settings::update_settings),
        )
        .route(
            "/api/v1/coach/invites/:token",
            get(coach_invites::validate_invite),
        );

    // Public slug lookup, rate limited per client
    let lookup_routes = Router::new()
        .route("/api/v1/coach/lookup-slug", get(coach_lookup::lookup_slug))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            lookup_rate_limit_middleware,
        ));

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(coach_routes)
        .merge(lookup_routes)
        // Global middleware (order matters: the last layer added is outermost)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors_layer(&config.security.cors_origins))
        .with_state(state)
}
