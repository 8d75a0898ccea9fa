//! Health check endpoint handlers.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use sqlx::PgPool;
use std::time::Instant;

use crate::app::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: DatabaseHealth,
}

/// Database health status.
#[derive(Debug, Serialize)]
pub struct DatabaseHealth {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

/// Simple status response for liveness and readiness checks.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

async fn check_database(pool: &PgPool) -> DatabaseHealth {
    let start = Instant::now();
    let connected = sqlx::query("SELECT 1").execute(pool).await.is_ok();
    DatabaseHealth {
        connected,
        latency_ms: connected.then(|| start.elapsed().as_millis() as u64),
    }
}

/// Full health check.
///
/// GET /api/health
pub async fn health_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let database = check_database(&state.pool).await;
    let status = if database.connected {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if database.connected { "healthy" } else { "unhealthy" },
            version: env!("CARGO_PKG_VERSION"),
            database,
        }),
    )
}

/// Liveness: 200 while the process runs.
///
/// GET /api/health/live
pub async fn live() -> Json<StatusResponse> {
    Json(StatusResponse { status: "alive" })
}

/// Readiness: 200 once the database answers.
///
/// GET /api/health/ready
pub async fn ready(State(state): State<AppState>) -> Result<Json<StatusResponse>, StatusCode> {
    if check_database(&state.pool).await.connected {
        Ok(Json(StatusResponse { status: "ready" }))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unhealthy_response_omits_latency() {
        let response = HealthResponse {
            status: "unhealthy",
            version: "0.3.0",
            database: DatabaseHealth {
                connected: false,
                latency_ms: None,
            },
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "unhealthy");
        assert_eq!(json["database"]["connected"], false);
        assert!(json["database"].get("latency_ms").is_none());
    }

    #[test]
    fn test_healthy_response_serialization() {
        let response = HealthResponse {
            status: "healthy",
            version: "0.3.0",
            database: DatabaseHealth {
                connected: true,
                latency_ms: Some(4),
            },
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["database"]["latency_ms"], 4);
    }
}
