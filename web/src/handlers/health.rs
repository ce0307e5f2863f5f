//! Health check endpoints.
//!
//! These endpoints are used by load balancers and orchestrators to verify
//! service health.

use crate::error::AppError;
use axum::{Json, http::StatusCode};
use booking_core::repository::StoreHealth;
use serde::Serialize;

/// Health response body.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HealthBody {
    /// `"ok"` for liveness, `"ready"` for readiness
    pub status: &'static str,
}

/// Liveness probe.
///
/// Returns 200 while the process is serving. Does NOT check dependencies.
///
/// ```text
/// GET /health  ->  {"status": "ok"}
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, Json<HealthBody>) {
    (StatusCode::OK, Json(HealthBody { status: "ok" }))
}

/// Readiness probe against the backing store.
///
/// ```text
/// GET /ready  ->  {"status": "ready"}  |  503 {"code": "SERVICE_UNAVAILABLE", ...}
/// ```
///
/// # Errors
///
/// Returns 503 when the store does not answer.
pub async fn readiness<H: StoreHealth>(store: &H) -> Result<Json<HealthBody>, AppError> {
    store.ping().await.map_err(|err| {
        tracing::warn!(error = %err, "Readiness check failed");
        AppError::unavailable("Database unavailable").with_source(err)
    })?;
    Ok(Json(HealthBody { status: "ready" }))
}
