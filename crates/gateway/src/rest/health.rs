//! Liveness endpoint

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;
use utoipa::ToSchema;

use crate::state::GatewayState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database cannot be reached.
    pub status: String,
    #[schema(example = "up")]
    pub database: String,
    pub timestamp: String,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service and database are up", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(
    State(state): State<Arc<GatewayState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let (status_code, status, database) = match salon_database::ping(&state.pool).await {
        Ok(()) => (StatusCode::OK, "ok", "up"),
        Err(error) => {
            warn!(error = %error, "health check could not reach the database");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "down")
        }
    };

    (
        status_code,
        Json(HealthResponse {
            status: status.to_string(),
            database: database.to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }),
    )
}
