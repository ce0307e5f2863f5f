//! Application state shared across handlers.

use booking_core::repository::{
    BookingRepository, EnrollmentRepository, SessionRepository, StoreHealth, TicketRepository,
};
use booking_core::{BookingEnvironment, BookingService};
use std::sync::Arc;

/// Everything the HTTP layer needs from storage.
///
/// Implemented for any type that provides every repository, such as
/// `PostgresStore` in production and `InMemoryStore` in tests.
pub trait BookingStore:
    EnrollmentRepository
    + TicketRepository
    + BookingRepository
    + SessionRepository
    + StoreHealth
    + Clone
    + 'static
{
}

impl<S> BookingStore for S where
    S: EnrollmentRepository
        + TicketRepository
        + BookingRepository
        + SessionRepository
        + StoreHealth
        + Clone
        + 'static
{
}

/// Booking service wired to a single store.
pub type StoreService<R> = BookingService<R, R, R>;

/// Application state.
pub struct AppState<R: BookingStore> {
    /// Booking rules
    pub service: Arc<StoreService<R>>,
    /// Store used for sessions and readiness
    pub store: R,
}

impl<R: BookingStore> AppState<R> {
    /// Build state around `store`.
    #[must_use]
    pub fn new(store: R) -> Self {
        let service = BookingService::new(BookingEnvironment::from_store(store.clone()));
        Self {
            service: Arc::new(service),
            store,
        }
    }
}

impl<R: BookingStore> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            store: self.store.clone(),
        }
    }
}
