//! Dependency injection for the booking service.

use crate::repository::{BookingRepository, EnrollmentRepository, TicketRepository};
use chrono::{DateTime, Utc};

/// Source of row timestamps for stores that do not get them from the
/// database.
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;
}

/// Booking environment.
///
/// Contains the external collaborators the booking rules read from and
/// write to.
///
/// # Type Parameters
///
/// - `E`: Enrollment repository
/// - `T`: Ticket repository
/// - `B`: Booking repository
#[derive(Debug, Clone)]
pub struct BookingEnvironment<E, T, B>
where
    E: EnrollmentRepository + Clone,
    T: TicketRepository + Clone,
    B: BookingRepository + Clone,
{
    /// Enrollment lookups.
    pub enrollments: E,

    /// Ticket lookups.
    pub tickets: T,

    /// Room and booking storage.
    pub bookings: B,
}

impl<E, T, B> BookingEnvironment<E, T, B>
where
    E: EnrollmentRepository + Clone,
    T: TicketRepository + Clone,
    B: BookingRepository + Clone,
{
    /// Create a new booking environment.
    #[must_use]
    pub const fn new(enrollments: E, tickets: T, bookings: B) -> Self {
        Self {
            enrollments,
            tickets,
            bookings,
        }
    }
}

impl<S> BookingEnvironment<S, S, S>
where
    S: EnrollmentRepository + TicketRepository + BookingRepository + Clone,
{
    /// Build an environment where one store serves every repository.
    #[must_use]
    pub fn from_store(store: S) -> Self {
        Self::new(store.clone(), store.clone(), store)
    }
}
