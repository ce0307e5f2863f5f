//! Error types for booking operations.
//!
//! Every rejection is classified as either [`BookingError::Forbidden`] or
//! [`BookingError::NotFound`]. The attached reason is for logs and tests; the
//! HTTP layer only looks at the classification.

use crate::types::RoomId;
use thiserror::Error;

/// Result type alias for booking operations.
pub type Result<T> = std::result::Result<T, BookingError>;

/// Why a request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForbiddenReason {
    /// Room id missing or not a positive key.
    InvalidRoomId,
    /// Booking id not a positive key.
    InvalidBookingId,
    /// The user never enrolled in the event.
    NoEnrollment,
    /// The enrollment has no ticket.
    NoTicket,
    /// The ticket is reserved but not paid.
    TicketNotPaid,
    /// Remote tickets never include accommodation.
    RemoteTicket,
    /// The ticket type does not include a hotel.
    HotelNotIncluded,
    /// The room has no vacancy.
    RoomFull,
}

impl ForbiddenReason {
    /// Short label used in logs and metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRoomId => "invalid_room_id",
            Self::InvalidBookingId => "invalid_booking_id",
            Self::NoEnrollment => "no_enrollment",
            Self::NoTicket => "no_ticket",
            Self::TicketNotPaid => "ticket_not_paid",
            Self::RemoteTicket => "remote_ticket",
            Self::HotelNotIncluded => "hotel_not_included",
            Self::RoomFull => "room_full",
        }
    }
}

impl std::fmt::Display for ForbiddenReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What could not be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundKind {
    /// No room with this id.
    Room(RoomId),
    /// The user holds no matching booking.
    Booking,
}

impl std::fmt::Display for NotFoundKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Room(id) => write!(f, "room {id}"),
            Self::Booking => f.write_str("booking"),
        }
    }
}

/// Failure reported by a persistence collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The database rejected or failed the query.
    #[error("Database error: {0}")]
    Database(String),

    /// A row could not be mapped to a domain type.
    #[error("Corrupt row: {0}")]
    CorruptRow(String),

    /// A row targeted by a write does not exist.
    #[error("Row not found: {0}")]
    RowNotFound(String),
}

/// Errors returned by the booking service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// The user is not allowed to perform the operation.
    #[error("Forbidden: {0}")]
    Forbidden(ForbiddenReason),

    /// A referenced resource does not exist.
    #[error("Not found: {0}")]
    NotFound(NotFoundKind),

    /// The persistence layer failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl BookingError {
    /// Label used for the `outcome` metric dimension.
    #[must_use]
    pub const fn outcome(&self) -> &'static str {
        match self {
            Self::Forbidden(_) => "forbidden",
            Self::NotFound(_) => "not_found",
            Self::Repository(_) => "error",
        }
    }
}

impl From<ForbiddenReason> for BookingError {
    fn from(reason: ForbiddenReason) -> Self {
        Self::Forbidden(reason)
    }
}

impl From<NotFoundKind> for BookingError {
    fn from(kind: NotFoundKind) -> Self {
        Self::NotFound(kind)
    }
}
