//! System health handler
//!
//! Independent of the forecast core: reports database connectivity and
//! process uptime so an orchestrator can probe the service.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
    pub uptime_seconds: u64,
    pub version: &'static str,
}

/// GET /api/health - System health: database connectivity, uptime, version
pub async fn get_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let database = state.db.ping();

    Json(HealthResponse {
        status: if database { "ok" } else { "degraded" },
        database,
        uptime_seconds: state.started_at.elapsed().as_secs(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
