//! Row shapes returned by queries and their mapping into domain types.

use booking_core::{
    Booking, BookingId, BookingWithRoom, Enrollment, EnrollmentId, HotelId, RepositoryError,
    Room, RoomId, Session, Ticket, TicketId, TicketStatus, TicketType, TicketTypeId, UserId,
};
use chrono::{DateTime, Utc};

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct EnrollmentRow {
    pub id: i32,
    pub user_id: i32,
}

impl From<EnrollmentRow> for Enrollment {
    fn from(row: EnrollmentRow) -> Self {
        Self {
            id: EnrollmentId::new(row.id),
            user_id: UserId::new(row.user_id),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct TicketRow {
    pub id: i32,
    pub enrollment_id: i32,
    pub status: String,
    pub ticket_type_id: i32,
    pub type_name: String,
    pub price: i32,
    pub is_remote: bool,
    pub includes_hotel: bool,
}

impl TryFrom<TicketRow> for Ticket {
    type Error = RepositoryError;

    fn try_from(row: TicketRow) -> Result<Self, Self::Error> {
        let status = TicketStatus::parse(&row.status).ok_or_else(|| {
            RepositoryError::CorruptRow(format!("ticket {}: status {:?}", row.id, row.status))
        })?;

        Ok(Self {
            id: TicketId::new(row.id),
            enrollment_id: EnrollmentId::new(row.enrollment_id),
            status,
            ticket_type: TicketType {
                id: TicketTypeId::new(row.ticket_type_id),
                name: row.type_name,
                price: row.price,
                is_remote: row.is_remote,
                includes_hotel: row.includes_hotel,
            },
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct RoomRow {
    pub id: i32,
    pub name: String,
    pub capacity: i32,
    pub hotel_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RoomRow> for Room {
    fn from(row: RoomRow) -> Self {
        Self {
            id: RoomId::new(row.id),
            name: row.name,
            capacity: row.capacity,
            hotel_id: HotelId::new(row.hotel_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct BookingRow {
    pub id: i32,
    pub user_id: i32,
    pub room_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Self {
            id: BookingId::new(row.id),
            user_id: UserId::new(row.user_id),
            room_id: RoomId::new(row.room_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A booking joined with its room; room columns are prefixed `room_`.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct BookingWithRoomRow {
    pub booking_id: i32,
    pub room_id: i32,
    pub room_name: String,
    pub room_capacity: i32,
    pub room_hotel_id: i32,
    pub room_created_at: DateTime<Utc>,
    pub room_updated_at: DateTime<Utc>,
}

impl From<BookingWithRoomRow> for BookingWithRoom {
    fn from(row: BookingWithRoomRow) -> Self {
        Self {
            id: BookingId::new(row.booking_id),
            room: Room {
                id: RoomId::new(row.room_id),
                name: row.room_name,
                capacity: row.room_capacity,
                hotel_id: HotelId::new(row.room_hotel_id),
                created_at: row.room_created_at,
                updated_at: row.room_updated_at,
            },
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct SessionRow {
    pub user_id: i32,
    pub token: String,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Self {
            user_id: UserId::new(row.user_id),
            token: row.token,
        }
    }
}
