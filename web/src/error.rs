//! HTTP error responses.
//!
//! [`AppError`] is the single error type returned by handlers. Booking
//! rejections convert into it with `?`: `Forbidden` becomes 403, `NotFound`
//! becomes 404 with an empty `{}` body and storage failures become an
//! opaque 500.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use booking_core::{BookingError, ForbiddenReason, NotFoundKind};
use serde::Serialize;
use serde_json::json;
use std::fmt;

/// Application error type for web handlers.
///
/// # Examples
///
/// ```ignore
/// async fn handler() -> Result<Json<Vec<BookingWithRoom>>, AppError> {
///     let bookings = service.get_booking(user_id).await?;
///     Ok(Json(bookings))
/// }
/// ```
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    /// User-facing message
    message: String,
    /// Stable code for client error handling
    code: &'static str,
    /// Logged, never sent to the client
    source: Option<anyhow::Error>,
    /// Send `{}` instead of `{code, message}`
    empty_body: bool,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>, code: &'static str) -> Self {
        Self {
            status,
            message: message.into(),
            code,
            source: None,
            empty_body: false,
        }
    }

    /// Attach the underlying cause.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Respond with an empty JSON object. Code and message are still logged.
    #[must_use]
    pub fn without_body(mut self) -> Self {
        self.empty_body = true;
        self
    }

    /// Create a 401 Unauthorized error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message, "UNAUTHORIZED")
    }

    /// Create a 403 Forbidden error.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message, "FORBIDDEN")
    }

    /// Create a 404 Not Found error.
    #[must_use]
    pub fn not_found(resource: impl fmt::Display) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            format!("{resource} not found"),
            "NOT_FOUND",
        )
    }

    /// Create a 500 Internal Server Error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            message,
            "INTERNAL_SERVER_ERROR",
        )
    }

    /// Create a 503 Service Unavailable error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message, "SERVICE_UNAVAILABLE")
    }

    /// HTTP status of the response.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Error code sent to the client.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Error response body (JSON).
#[derive(Debug, Serialize)]
struct ErrorResponse {
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            match &self.source {
                Some(source) => tracing::error!(
                    status = %self.status,
                    code = self.code,
                    message = %self.message,
                    error = %source,
                    "Internal server error"
                ),
                None => tracing::error!(
                    status = %self.status,
                    code = self.code,
                    message = %self.message,
                    "Internal server error"
                ),
            }
        }

        if self.empty_body {
            return (self.status, Json(json!({}))).into_response();
        }

        let body = ErrorResponse {
            code: self.code,
            message: self.message,
        };

        (self.status, Json(body)).into_response()
    }
}

fn forbidden_message(reason: ForbiddenReason) -> &'static str {
    match reason {
        ForbiddenReason::InvalidRoomId => "A valid roomId is required",
        ForbiddenReason::InvalidBookingId => "A valid bookingId is required",
        ForbiddenReason::NoEnrollment => "User is not enrolled",
        ForbiddenReason::NoTicket => "User has no ticket",
        ForbiddenReason::TicketNotPaid => "Ticket has not been paid",
        ForbiddenReason::RemoteTicket => "Remote tickets do not include a hotel",
        ForbiddenReason::HotelNotIncluded => "Ticket does not include a hotel",
        ForbiddenReason::RoomFull => "Room has no vacancy",
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Forbidden(reason) => Self::forbidden(forbidden_message(reason)),
            BookingError::NotFound(NotFoundKind::Room(id)) => {
                Self::not_found(format_args!("Room {id}")).without_body()
            }
            BookingError::NotFound(NotFoundKind::Booking) => {
                Self::not_found("Booking").without_body()
            }
            BookingError::Repository(source) => {
                Self::internal("An internal error occurred").with_source(source)
            }
        }
    }
}
