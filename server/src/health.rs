//! Health check endpoints.

use crate::state::{AppState, BookingStore};
use axum::{Json, extract::State};
use booking_web::WebResult;
use booking_web::handlers::{HealthBody, readiness};

pub use booking_web::handlers::health_check;

/// Readiness check: 200 when the database answers, 503 otherwise.
///
/// # Errors
///
/// Returns 503 Service Unavailable when the store cannot be reached.
pub async fn readiness_check<R: BookingStore>(
    State(state): State<AppState<R>>,
) -> WebResult<Json<HealthBody>> {
    readiness(&state.store).await
}
