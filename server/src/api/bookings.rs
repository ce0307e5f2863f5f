//! Booking endpoints.
//!
//! - `GET /booking`: the caller's booking with its room
//! - `POST /booking`: book a room
//! - `PUT /booking/:bookingId`: move the caller's booking to another room
//!
//! Handlers only translate between HTTP and the booking service. Request
//! bodies are read leniently: a missing or malformed body is treated as a
//! request without a `roomId`, which the service rejects as forbidden.

use crate::auth::SessionUser;
use crate::state::{AppState, BookingStore};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use booking_core::{Booking, BookingId, BookingWithRoom};
use booking_web::{CorrelationId, LenientJson, WebResult};
use serde::{Deserialize, Serialize};

/// Body of `POST /booking` and `PUT /booking/:bookingId`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRequest {
    /// Requested room
    #[serde(default)]
    pub room_id: Option<i64>,
}

/// Response of `POST /booking`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreated {
    /// ID of the new booking
    pub booking_id: BookingId,
}

/// `GET /booking`
///
/// # Errors
///
/// 403 when the caller is not an eligible ticket holder, 404 when they hold
/// no booking.
pub async fn get_booking<R: BookingStore>(
    State(state): State<AppState<R>>,
    correlation_id: CorrelationId,
    user: SessionUser,
) -> WebResult<Json<Vec<BookingWithRoom>>> {
    tracing::debug!(correlation_id = %correlation_id.0, user_id = %user.user_id, "Listing booking");

    let bookings = state.service.get_booking(user.user_id).await?;
    Ok(Json(bookings))
}

/// `POST /booking`
///
/// # Errors
///
/// 403 when the room id is missing or invalid, the caller is not an
/// eligible ticket holder, or the room is full. 404 when the room does not
/// exist.
pub async fn post_booking<R: BookingStore>(
    State(state): State<AppState<R>>,
    correlation_id: CorrelationId,
    user: SessionUser,
    LenientJson(request): LenientJson<RoomRequest>,
) -> WebResult<(StatusCode, Json<BookingCreated>)> {
    tracing::debug!(
        correlation_id = %correlation_id.0,
        user_id = %user.user_id,
        room_id = ?request.room_id,
        "Booking room"
    );

    let booking = state
        .service
        .book_room(user.user_id, request.room_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BookingCreated {
            booking_id: booking.id,
        }),
    ))
}

/// `PUT /booking/:bookingId`
///
/// A path segment that is not an integer is treated as booking id 0.
///
/// # Errors
///
/// 403 when the room or booking id is invalid, the caller is not an
/// eligible ticket holder, or the target room is full. 404 when the room
/// does not exist or the booking is not the caller's.
pub async fn put_booking<R: BookingStore>(
    State(state): State<AppState<R>>,
    correlation_id: CorrelationId,
    user: SessionUser,
    Path(raw_booking_id): Path<String>,
    LenientJson(request): LenientJson<RoomRequest>,
) -> WebResult<Json<Booking>> {
    let booking_id = raw_booking_id.trim().parse::<i64>().unwrap_or(0);
    tracing::debug!(
        correlation_id = %correlation_id.0,
        user_id = %user.user_id,
        booking_id,
        room_id = ?request.room_id,
        "Changing room"
    );

    let booking = state
        .service
        .change_room(user.user_id, request.room_id, booking_id)
        .await?;

    Ok(Json(booking))
}
