//! Ready-made scenarios on top of [`InMemoryStore`].
//!
//! Each helper seeds the rows a user needs to reach a given point in the
//! booking checks.

use crate::store::InMemoryStore;
use booking_core::{Enrollment, HotelId, Room, Ticket, TicketStatus, UserId};

/// Capacity used by [`room_in_new_hotel`]. Two bookings fill it.
pub const DEFAULT_ROOM_CAPACITY: i32 = 2;

/// A user with a session, and optionally an enrollment and a ticket.
#[derive(Debug, Clone)]
pub struct TestUser {
    /// The user
    pub id: UserId,
    /// Bearer token of the user's session
    pub token: String,
    /// Enrollment, if one was created
    pub enrollment: Option<Enrollment>,
    /// Ticket, if one was issued
    pub ticket: Option<Ticket>,
}

/// Kind of ticket a fixture user holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketKind {
    /// In-person ticket with hotel included
    WithHotel,
    /// In-person ticket without hotel
    WithoutHotel,
    /// Online-only ticket
    Remote,
}

/// A user who can log in but has not enrolled.
pub fn signed_in_user(store: &InMemoryStore) -> TestUser {
    let id = store.create_user();
    let token = store.create_session(id);
    TestUser {
        id,
        token,
        enrollment: None,
        ticket: None,
    }
}

/// An enrolled user without a ticket.
pub fn enrolled_user(store: &InMemoryStore) -> TestUser {
    let mut user = signed_in_user(store);
    user.enrollment = Some(store.create_enrollment(user.id));
    user
}

/// An enrolled user holding a ticket of `kind` in `status`.
pub fn ticket_holder(store: &InMemoryStore, kind: TicketKind, status: TicketStatus) -> TestUser {
    let mut user = enrolled_user(store);
    let (is_remote, includes_hotel) = match kind {
        TicketKind::WithHotel => (false, true),
        TicketKind::WithoutHotel => (false, false),
        TicketKind::Remote => (true, false),
    };
    let ticket_type = store.create_ticket_type(is_remote, includes_hotel);
    if let Some(enrollment) = &user.enrollment {
        user.ticket = Some(store.create_ticket(enrollment.id, &ticket_type, status));
    }
    user
}

/// A user allowed to book: paid, in-person, hotel included.
pub fn eligible_user(store: &InMemoryStore) -> TestUser {
    ticket_holder(store, TicketKind::WithHotel, TicketStatus::Paid)
}

/// A fresh hotel with one room of [`DEFAULT_ROOM_CAPACITY`] places.
pub fn room_in_new_hotel(store: &InMemoryStore) -> (HotelId, Room) {
    let hotel = store.create_hotel();
    let room = store.create_room(hotel, DEFAULT_ROOM_CAPACITY);
    (hotel, room)
}

/// Fill every free place of `room` with bookings by new users.
pub fn fill_room(store: &InMemoryStore, room: &Room) {
    for _ in 0..room.capacity {
        let occupant = store.create_user();
        store.create_booking(room.id, occupant);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booking_core::repository::{EnrollmentRepository, SessionRepository};

    #[test]
    fn test_eligible_user_has_paid_hotel_ticket() {
        let store = InMemoryStore::new();
        let user = eligible_user(&store);

        let ticket = user.ticket.as_ref();
        assert_eq!(ticket.map(|t| t.status), Some(TicketStatus::Paid));
        assert_eq!(ticket.map(|t| t.ticket_type.includes_hotel), Some(true));
        assert_eq!(ticket.map(|t| t.ticket_type.is_remote), Some(false));
    }

    #[test]
    fn test_fill_room_books_every_place() {
        let store = InMemoryStore::new();
        let (_, room) = room_in_new_hotel(&store);
        fill_room(&store, &room);

        let held = store
            .bookings()
            .into_iter()
            .filter(|booking| booking.room_id == room.id)
            .count();
        assert_eq!(held, 2);
    }

    #[test]
    fn test_signed_in_user_resolves_by_token_but_not_enrolled() {
        let store = InMemoryStore::new();
        let user = signed_in_user(&store);

        let session = tokio_test::block_on(store.find_by_token(&user.token));
        assert_eq!(session.map(|s| s.map(|s| s.user_id)), Ok(Some(user.id)));

        let enrollment = tokio_test::block_on(store.find_by_user_id(user.id));
        assert_eq!(enrollment, Ok(None));
    }
}
