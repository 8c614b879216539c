//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::AppContext;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub backend: &'static str,
    pub version: &'static str,
}

/// `GET /health` — liveness check. The classifier is always loaded once
/// the server is accepting connections.
pub async fn check(State(ctx): State<AppContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        backend: ctx.classifier.backend(),
        version: crate::config::APP_VERSION,
    })
}
