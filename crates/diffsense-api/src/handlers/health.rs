//! Liveness probe

use axum::Json;

use crate::models::HealthResponse;

/// Report service liveness
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
