//! The booking service.
//!
//! Each operation is a straight sequence of lookups and checks from
//! [`crate::eligibility`], ending in at most one repository write. The first
//! failing check decides the outcome and nothing is written.

use crate::eligibility;
use crate::environment::BookingEnvironment;
use crate::error::{BookingError, NotFoundKind, Result};
use crate::repository::{BookingRepository, EnrollmentRepository, TicketRepository};
use crate::types::{Booking, BookingWithRoom, UserId};

/// Counter of booking requests by operation and outcome.
pub const REQUESTS_TOTAL: &str = "booking_requests_total";

/// Hotel booking service.
///
/// # Type Parameters
///
/// - `E`: Enrollment repository
/// - `T`: Ticket repository
/// - `B`: Booking repository
#[derive(Debug, Clone)]
pub struct BookingService<E, T, B>
where
    E: EnrollmentRepository + Clone,
    T: TicketRepository + Clone,
    B: BookingRepository + Clone,
{
    env: BookingEnvironment<E, T, B>,
}

impl<E, T, B> BookingService<E, T, B>
where
    E: EnrollmentRepository + Clone,
    T: TicketRepository + Clone,
    B: BookingRepository + Clone,
{
    /// Create a service over the given environment.
    #[must_use]
    pub const fn new(env: BookingEnvironment<E, T, B>) -> Self {
        Self { env }
    }

    /// Reserve a place in a room for the user.
    ///
    /// # Errors
    ///
    /// - `Forbidden` when the room id is invalid, the user is not an eligible
    ///   ticket holder, or the room is full
    /// - `NotFound` when the room does not exist
    /// - `Repository` when storage fails
    #[tracing::instrument(skip(self), fields(user_id = %user_id))]
    pub async fn book_room(&self, user_id: UserId, room_id: Option<i64>) -> Result<Booking> {
        let result = self.try_book_room(user_id, room_id).await;
        record("book_room", &result);
        result
    }

    /// List the user's booking together with the booked room.
    ///
    /// # Errors
    ///
    /// - `Forbidden` when the user is not an eligible ticket holder
    /// - `NotFound` when the user holds no booking
    /// - `Repository` when storage fails
    #[tracing::instrument(skip(self), fields(user_id = %user_id))]
    pub async fn get_booking(&self, user_id: UserId) -> Result<Vec<BookingWithRoom>> {
        let result = self.try_get_booking(user_id).await;
        record("get_booking", &result);
        result
    }

    /// Move the user's booking to another room.
    ///
    /// # Errors
    ///
    /// - `Forbidden` when the room or booking id is invalid, the user is not
    ///   an eligible ticket holder, or the target room is full
    /// - `NotFound` when the room does not exist or the booking is not the
    ///   user's
    /// - `Repository` when storage fails
    #[tracing::instrument(skip(self), fields(user_id = %user_id))]
    pub async fn change_room(
        &self,
        user_id: UserId,
        room_id: Option<i64>,
        booking_id: i64,
    ) -> Result<Booking> {
        let result = self.try_change_room(user_id, room_id, booking_id).await;
        record("change_room", &result);
        result
    }

    async fn try_book_room(&self, user_id: UserId, room_id: Option<i64>) -> Result<Booking> {
        let room_id = eligibility::parse_room_id(room_id)?;
        self.check_ticket_holder(user_id).await?;

        let room = self.env.bookings.find_room_with_bookings(room_id).await?;
        let room = eligibility::require_room(room_id, room)?;
        eligibility::check_vacancy(&room)?;

        let booking = self.env.bookings.create_booking(room_id, user_id).await?;
        tracing::info!(booking_id = %booking.id, room_id = %room_id, "Room booked");
        Ok(booking)
    }

    async fn try_get_booking(&self, user_id: UserId) -> Result<Vec<BookingWithRoom>> {
        self.check_ticket_holder(user_id).await?;

        let bookings = self.env.bookings.find_bookings_by_user_id(user_id).await?;
        if bookings.is_empty() {
            return Err(NotFoundKind::Booking.into());
        }
        Ok(bookings)
    }

    async fn try_change_room(
        &self,
        user_id: UserId,
        room_id: Option<i64>,
        booking_id: i64,
    ) -> Result<Booking> {
        let room_id = eligibility::parse_room_id(room_id)?;
        self.check_ticket_holder(user_id).await?;

        let room = self.env.bookings.find_room_with_bookings(room_id).await?;
        let room = eligibility::require_room(room_id, room)?;

        let booking_id = eligibility::parse_booking_id(booking_id)?;
        eligibility::check_vacancy(&room)?;

        let held = self.env.bookings.find_bookings_by_user_id(user_id).await?;
        eligibility::check_ownership(booking_id, &held)?;

        let booking = self
            .env
            .bookings
            .update_booking_room(booking_id, room_id)
            .await?;
        tracing::info!(booking_id = %booking_id, room_id = %room_id, "Booking moved");
        Ok(booking)
    }

    /// Enrollment and ticket checks shared by every operation.
    async fn check_ticket_holder(&self, user_id: UserId) -> Result<()> {
        let enrollment = self.env.enrollments.find_by_user_id(user_id).await?;
        let enrollment = eligibility::require_enrollment(enrollment)?;

        let ticket = self.env.tickets.find_by_enrollment_id(enrollment.id).await?;
        eligibility::check_ticket(ticket.as_ref())
    }
}

fn record<V>(operation: &'static str, result: &Result<V>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(err) => err.outcome(),
    };
    metrics::counter!(REQUESTS_TOTAL, "operation" => operation, "outcome" => outcome)
        .increment(1);

    match result {
        Ok(_) => {}
        Err(BookingError::Forbidden(reason)) => {
            tracing::info!(operation, reason = %reason, "Booking request forbidden");
        }
        Err(BookingError::NotFound(kind)) => {
            tracing::info!(operation, missing = %kind, "Booking request target not found");
        }
        Err(BookingError::Repository(err)) => {
            tracing::error!(operation, error = %err, "Booking storage failure");
        }
    }
}
