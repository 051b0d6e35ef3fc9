//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::response::{ApiResponse, ComponentHealth, HealthResponse};
use crate::state::AppState;

/// GET /api/health
///
/// Returns 503 when the store or the storage root is unavailable.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let store_healthy = state.store.health_check().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Document store health check failed");
        false
    });
    let storage_healthy = state.storage.health_check().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Storage health check failed");
        false
    });

    let healthy = store_healthy && storage_healthy;
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = HealthResponse {
        status: if healthy { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        store: ComponentHealth {
            provider: state.store.provider_type().to_string(),
            healthy: store_healthy,
        },
        storage: ComponentHealth {
            provider: state.storage.provider_type().to_string(),
            healthy: storage_healthy,
        },
    };

    (status, Json(ApiResponse::ok(body)))
}
