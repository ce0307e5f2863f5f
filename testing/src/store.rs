//! In-memory implementation of every booking repository.
//!
//! Tables live behind one `Arc<Mutex<_>>`, so clones share state the way
//! clones of a connection pool share a database. Keys are handed out
//! sequentially starting at 1, like serial columns.

use booking_core::environment::Clock;
use booking_core::repository::{
    BookingRepository, EnrollmentRepository, RepositoryResult, SessionRepository, StoreHealth,
    TicketRepository,
};
use booking_core::{
    Booking, BookingId, BookingWithRoom, Enrollment, EnrollmentId, HotelId, RepositoryError,
    Room, RoomId, RoomWithBookings, Session, Ticket, TicketId, TicketStatus, TicketType,
    TicketTypeId, UserId,
};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::mocks::test_clock;

#[derive(Debug, Default)]
struct Tables {
    next_id: i32,
    users: Vec<UserId>,
    sessions: HashMap<String, UserId>,
    enrollments: Vec<Enrollment>,
    ticket_types: Vec<TicketType>,
    tickets: Vec<TicketRow>,
    hotels: Vec<HotelId>,
    rooms: Vec<Room>,
    bookings: Vec<Booking>,
    unavailable: bool,
}

impl Tables {
    const fn next_key(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn check_available(&self) -> RepositoryResult<()> {
        if self.unavailable {
            return Err(RepositoryError::Database(
                "connection refused".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct TicketRow {
    id: TicketId,
    enrollment_id: EnrollmentId,
    ticket_type_id: TicketTypeId,
    status: TicketStatus,
}

/// In-memory booking store.
///
/// Implements [`EnrollmentRepository`], [`TicketRepository`],
/// [`BookingRepository`] and [`SessionRepository`]. The `create_*` methods
/// seed rows synchronously for test setup.
#[derive(Clone)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStore").finish_non_exhaustive()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Create an empty store stamped by [`test_clock`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(test_clock())
    }

    /// Create an empty store that stamps rows with `clock`.
    #[must_use]
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            tables: Arc::new(Mutex::new(Tables::default())),
            clock: Arc::new(clock),
        }
    }

    /// Make every repository call fail with a database error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    #[allow(clippy::expect_used)] // Test store: a poisoned lock is a test failure
    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("in-memory store lock poisoned")
    }

    // ------------------------------------------------------------------
    // Seeding
    // ------------------------------------------------------------------

    /// Register a user.
    pub fn create_user(&self) -> UserId {
        let mut tables = self.lock();
        let id = UserId::new(tables.next_key());
        tables.users.push(id);
        id
    }

    /// Open a session for `user_id` and return its bearer token.
    pub fn create_session(&self, user_id: UserId) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        self.lock().sessions.insert(token.clone(), user_id);
        token
    }

    /// Enroll `user_id` in the event.
    pub fn create_enrollment(&self, user_id: UserId) -> Enrollment {
        let mut tables = self.lock();
        let enrollment = Enrollment {
            id: EnrollmentId::new(tables.next_key()),
            user_id,
        };
        tables.enrollments.push(enrollment.clone());
        enrollment
    }

    /// Add a ticket type.
    pub fn create_ticket_type(&self, is_remote: bool, includes_hotel: bool) -> TicketType {
        let mut tables = self.lock();
        let id = tables.next_key();
        let ticket_type = TicketType {
            id: TicketTypeId::new(id),
            name: format!("Ticket type {id}"),
            price: if includes_hotel { 600 } else { 250 },
            is_remote,
            includes_hotel,
        };
        tables.ticket_types.push(ticket_type.clone());
        ticket_type
    }

    /// Issue a ticket of `ticket_type` for `enrollment_id`.
    pub fn create_ticket(
        &self,
        enrollment_id: EnrollmentId,
        ticket_type: &TicketType,
        status: TicketStatus,
    ) -> Ticket {
        let mut tables = self.lock();
        let row = TicketRow {
            id: TicketId::new(tables.next_key()),
            enrollment_id,
            ticket_type_id: ticket_type.id,
            status,
        };
        tables.tickets.push(row.clone());
        Ticket {
            id: row.id,
            enrollment_id,
            status,
            ticket_type: ticket_type.clone(),
        }
    }

    /// Add a hotel.
    pub fn create_hotel(&self) -> HotelId {
        let mut tables = self.lock();
        let id = HotelId::new(tables.next_key());
        tables.hotels.push(id);
        id
    }

    /// Add a room with `capacity` places to `hotel_id`.
    pub fn create_room(&self, hotel_id: HotelId, capacity: i32) -> Room {
        let now = self.clock.now();
        let mut tables = self.lock();
        let id = tables.next_key();
        let room = Room {
            id: RoomId::new(id),
            name: format!("{}", 100 + id),
            capacity,
            hotel_id,
            created_at: now,
            updated_at: now,
        };
        tables.rooms.push(room.clone());
        room
    }

    /// Record a booking without any checks.
    pub fn create_booking(&self, room_id: RoomId, user_id: UserId) -> Booking {
        let now = self.clock.now();
        let mut tables = self.lock();
        let booking = Booking {
            id: BookingId::new(tables.next_key()),
            user_id,
            room_id,
            created_at: now,
            updated_at: now,
        };
        tables.bookings.push(booking.clone());
        booking
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    /// Every booking in insertion order.
    #[must_use]
    pub fn bookings(&self) -> Vec<Booking> {
        self.lock().bookings.clone()
    }

    /// Look up a single booking.
    #[must_use]
    pub fn booking(&self, booking_id: BookingId) -> Option<Booking> {
        self.lock()
            .bookings
            .iter()
            .find(|booking| booking.id == booking_id)
            .cloned()
    }

    fn read<R>(&self, query: impl FnOnce(&Tables) -> R) -> RepositoryResult<R> {
        let tables = self
            .tables
            .lock()
            .map_err(|_| RepositoryError::Database("lock poisoned".to_string()))?;
        tables.check_available()?;
        Ok(query(&tables))
    }

    fn write<R>(
        &self,
        change: impl FnOnce(&mut Tables) -> RepositoryResult<R>,
    ) -> RepositoryResult<R> {
        let mut tables = self
            .tables
            .lock()
            .map_err(|_| RepositoryError::Database("lock poisoned".to_string()))?;
        tables.check_available()?;
        change(&mut tables)
    }
}

impl EnrollmentRepository for InMemoryStore {
    fn find_by_user_id(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = RepositoryResult<Option<Enrollment>>> + Send {
        let result = self.read(|tables| {
            tables
                .enrollments
                .iter()
                .find(|enrollment| enrollment.user_id == user_id)
                .cloned()
        });
        async move { result }
    }
}

impl TicketRepository for InMemoryStore {
    fn find_by_enrollment_id(
        &self,
        enrollment_id: EnrollmentId,
    ) -> impl Future<Output = RepositoryResult<Option<Ticket>>> + Send {
        let result = self.read(|tables| {
            let row = tables
                .tickets
                .iter()
                .find(|ticket| ticket.enrollment_id == enrollment_id)?;
            let ticket_type = tables
                .ticket_types
                .iter()
                .find(|ticket_type| ticket_type.id == row.ticket_type_id)?;
            Some(Ticket {
                id: row.id,
                enrollment_id: row.enrollment_id,
                status: row.status,
                ticket_type: ticket_type.clone(),
            })
        });
        async move { result }
    }
}

impl BookingRepository for InMemoryStore {
    fn find_room_with_bookings(
        &self,
        room_id: RoomId,
    ) -> impl Future<Output = RepositoryResult<Option<RoomWithBookings>>> + Send {
        let result = self.read(|tables| {
            let room = tables.rooms.iter().find(|room| room.id == room_id)?;
            Some(RoomWithBookings {
                room: room.clone(),
                bookings: tables
                    .bookings
                    .iter()
                    .filter(|booking| booking.room_id == room_id)
                    .cloned()
                    .collect(),
            })
        });
        async move { result }
    }

    fn find_bookings_by_user_id(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = RepositoryResult<Vec<BookingWithRoom>>> + Send {
        let result = self.read(|tables| {
            tables
                .bookings
                .iter()
                .filter(|booking| booking.user_id == user_id)
                .filter_map(|booking| {
                    let room = tables.rooms.iter().find(|room| room.id == booking.room_id)?;
                    Some(BookingWithRoom {
                        id: booking.id,
                        room: room.clone(),
                    })
                })
                .collect()
        });
        async move { result }
    }

    fn create_booking(
        &self,
        room_id: RoomId,
        user_id: UserId,
    ) -> impl Future<Output = RepositoryResult<Booking>> + Send {
        let now = self.clock.now();
        let result = self.write(|tables| {
            if !tables.rooms.iter().any(|room| room.id == room_id) {
                return Err(RepositoryError::Database(format!(
                    "foreign key violation: room {room_id}"
                )));
            }
            let booking = Booking {
                id: BookingId::new(tables.next_key()),
                user_id,
                room_id,
                created_at: now,
                updated_at: now,
            };
            tables.bookings.push(booking.clone());
            Ok(booking)
        });
        async move { result }
    }

    fn update_booking_room(
        &self,
        booking_id: BookingId,
        room_id: RoomId,
    ) -> impl Future<Output = RepositoryResult<Booking>> + Send {
        let now = self.clock.now();
        let result = self.write(|tables| {
            let booking = tables
                .bookings
                .iter_mut()
                .find(|booking| booking.id == booking_id)
                .ok_or_else(|| RepositoryError::RowNotFound(format!("booking {booking_id}")))?;
            booking.room_id = room_id;
            booking.updated_at = now;
            Ok(booking.clone())
        });
        async move { result }
    }
}

impl StoreHealth for InMemoryStore {
    fn ping(&self) -> impl Future<Output = RepositoryResult<()>> + Send {
        let result = self.read(|_| ());
        async move { result }
    }
}

impl SessionRepository for InMemoryStore {
    fn find_by_token(
        &self,
        token: &str,
    ) -> impl Future<Output = RepositoryResult<Option<Session>>> + Send {
        let result = self.read(|tables| {
            tables.sessions.get(token).map(|user_id| Session {
                user_id: *user_id,
                token: token.to_string(),
            })
        });
        async move { result }
    }
}
