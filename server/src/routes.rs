//! Router configuration for the booking server.

use crate::api::bookings;
use crate::health::{health_check, readiness_check};
use crate::state::{AppState, BookingStore};
use axum::{
    Router,
    routing::{get, put},
};
use booking_web::correlation_id_layer;
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// - `GET /health`, `GET /ready`: no authentication
/// - `GET|POST /booking`, `PUT /booking/:bookingId`: bearer session required
///
/// Requests are traced by `TraceLayer` inside the correlation ID span.
pub fn build_router<R: BookingStore>(state: AppState<R>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check::<R>))
        .route(
            "/booking",
            get(bookings::get_booking::<R>).post(bookings::post_booking::<R>),
        )
        .route("/booking/:bookingId", put(bookings::put_booking::<R>))
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
        .with_state(state)
}
