//! Liveness and readiness probes

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use std::time::Instant;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProbeResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub database: DatabaseCheck,
}

#[derive(Debug, Serialize)]
pub struct DatabaseCheck {
    pub reachable: bool,
    pub latency_ms: u64,
}

/// GET /health - the process is up; touches no dependencies
pub async fn health() -> Json<ProbeResponse> {
    Json(ProbeResponse { status: "ok" })
}

/// GET /ready - the service can reach its database
///
/// Returns 503 with the same body shape when the pool cannot execute a
/// trivial query, so orchestrators keep traffic away until storage is back.
pub async fn ready(
    State(state): State<AppState>,
) -> Result<Json<ReadyResponse>, (StatusCode, Json<ReadyResponse>)> {
    let started = Instant::now();
    let reachable = sqlx::query("SELECT 1").execute(&*state.pool).await.is_ok();

    let body = ReadyResponse {
        status: if reachable { "ready" } else { "unavailable" },
        database: DatabaseCheck {
            reachable,
            latency_ms: started.elapsed().as_millis() as u64,
        },
    };

    if reachable {
        Ok(Json(body))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(body)))
    }
}
