//! `/api/health`

use axum::Json;
use lemmi_shared::HealthResponse;

/// Liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_owned(),
    })
}
