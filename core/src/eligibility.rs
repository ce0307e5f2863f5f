//! Booking eligibility rules.
//!
//! Pure predicates over data already loaded by the service. Each returns the
//! first violated rule as a [`BookingError`]; the service calls them in a
//! fixed order so the first failing check decides the response.

use crate::error::{BookingError, ForbiddenReason, NotFoundKind, Result};
use crate::types::{
    BookingId, BookingWithRoom, Enrollment, RoomId, RoomWithBookings, Ticket, TicketStatus,
};

/// Validate a client-supplied room id.
///
/// # Errors
///
/// `Forbidden(InvalidRoomId)` when the id is missing or not positive.
pub fn parse_room_id(raw: Option<i64>) -> Result<RoomId> {
    raw.and_then(RoomId::from_raw)
        .ok_or(BookingError::Forbidden(ForbiddenReason::InvalidRoomId))
}

/// Validate a client-supplied booking id.
///
/// # Errors
///
/// `Forbidden(InvalidBookingId)` when the id is not positive.
pub fn parse_booking_id(raw: i64) -> Result<BookingId> {
    BookingId::from_raw(raw).ok_or(BookingError::Forbidden(ForbiddenReason::InvalidBookingId))
}

/// Require that the user is enrolled.
///
/// # Errors
///
/// `Forbidden(NoEnrollment)` when there is no enrollment.
pub fn require_enrollment(enrollment: Option<Enrollment>) -> Result<Enrollment> {
    enrollment.ok_or(BookingError::Forbidden(ForbiddenReason::NoEnrollment))
}

/// Require a paid, in-person ticket that includes a hotel.
///
/// # Errors
///
/// Checked in order: `NoTicket`, `TicketNotPaid`, `RemoteTicket`,
/// `HotelNotIncluded`.
pub fn check_ticket(ticket: Option<&Ticket>) -> Result<()> {
    let ticket = ticket.ok_or(ForbiddenReason::NoTicket)?;

    if ticket.status == TicketStatus::Reserved {
        return Err(ForbiddenReason::TicketNotPaid.into());
    }
    if ticket.ticket_type.is_remote {
        return Err(ForbiddenReason::RemoteTicket.into());
    }
    if !ticket.ticket_type.includes_hotel {
        return Err(ForbiddenReason::HotelNotIncluded.into());
    }

    Ok(())
}

/// Require that the room exists.
///
/// # Errors
///
/// `NotFound(Room)` when the lookup came back empty.
pub fn require_room(room_id: RoomId, room: Option<RoomWithBookings>) -> Result<RoomWithBookings> {
    room.ok_or(BookingError::NotFound(NotFoundKind::Room(room_id)))
}

/// Require a free place in the room.
///
/// # Errors
///
/// `Forbidden(RoomFull)` when the bookings already reach capacity.
pub fn check_vacancy(room: &RoomWithBookings) -> Result<()> {
    if room.is_full() {
        return Err(ForbiddenReason::RoomFull.into());
    }
    Ok(())
}

/// Require that `booking_id` is the booking the user holds.
///
/// Only the user's first booking is considered.
///
/// # Errors
///
/// `NotFound(Booking)` when the user has no booking or holds a different one.
pub fn check_ownership(booking_id: BookingId, user_bookings: &[BookingWithRoom]) -> Result<()> {
    match user_bookings.first() {
        Some(held) if held.id == booking_id => Ok(()),
        _ => Err(NotFoundKind::Booking.into()),
    }
}
