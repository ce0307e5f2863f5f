//! Repository traits.
//!
//! These are the narrow interfaces the booking rules use to reach the
//! persistence layer. They are plain data access: no checks, no branching.
//!
//! # Implementations
//!
//! - `PostgresStore` (in `booking-postgres`): production storage
//! - `InMemoryStore` (in `booking-testing`): fast, deterministic tests
//!
//! Methods return `impl Future + Send` so services built on them can be
//! driven from multi-threaded HTTP handlers.

use crate::error::RepositoryError;
use crate::types::{
    Booking, BookingId, BookingWithRoom, Enrollment, EnrollmentId, RoomId, RoomWithBookings,
    Session, Ticket, UserId,
};
use std::future::Future;

/// Result type alias for repository calls.
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Read access to event enrollments.
pub trait EnrollmentRepository: Send + Sync {
    /// Find the enrollment owned by a user.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    fn find_by_user_id(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = RepositoryResult<Option<Enrollment>>> + Send;
}

/// Read access to tickets.
pub trait TicketRepository: Send + Sync {
    /// Find the ticket issued for an enrollment, joined with its type.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    fn find_by_enrollment_id(
        &self,
        enrollment_id: EnrollmentId,
    ) -> impl Future<Output = RepositoryResult<Option<Ticket>>> + Send;
}

/// Rooms and bookings.
pub trait BookingRepository: Send + Sync {
    /// Find a room together with every booking that holds it.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    fn find_room_with_bookings(
        &self,
        room_id: RoomId,
    ) -> impl Future<Output = RepositoryResult<Option<RoomWithBookings>>> + Send;

    /// List a user's bookings with their rooms, oldest first.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    fn find_bookings_by_user_id(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = RepositoryResult<Vec<BookingWithRoom>>> + Send;

    /// Insert a booking of `room_id` for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns error if the insert fails.
    fn create_booking(
        &self,
        room_id: RoomId,
        user_id: UserId,
    ) -> impl Future<Output = RepositoryResult<Booking>> + Send;

    /// Point an existing booking at a different room.
    ///
    /// # Errors
    ///
    /// Returns error if the update fails or the booking does not exist.
    fn update_booking_room(
        &self,
        booking_id: BookingId,
        room_id: RoomId,
    ) -> impl Future<Output = RepositoryResult<Booking>> + Send;
}

/// Reachability probe used by readiness checks.
pub trait StoreHealth: Send + Sync {
    /// Round-trip to the backing store.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be reached.
    fn ping(&self) -> impl Future<Output = RepositoryResult<()>> + Send;
}

/// Session lookup for bearer-token authentication.
pub trait SessionRepository: Send + Sync {
    /// Find the session issued with `token`.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    fn find_by_token(
        &self,
        token: &str,
    ) -> impl Future<Output = RepositoryResult<Option<Session>>> + Send;
}
