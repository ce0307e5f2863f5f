//! Room occupancy and booking writes.

use crate::rows::{BookingRow, BookingWithRoomRow, RoomRow};
use crate::{PostgresStore, db_error};
use booking_core::repository::{BookingRepository, RepositoryResult};
use booking_core::{
    Booking, BookingId, BookingWithRoom, RepositoryError, Room, RoomId, RoomWithBookings, UserId,
};

const BOOKING_COLUMNS: &str = "id, user_id, room_id, created_at, updated_at";

impl BookingRepository for PostgresStore {
    async fn find_room_with_bookings(
        &self,
        room_id: RoomId,
    ) -> RepositoryResult<Option<RoomWithBookings>> {
        let Some(room) = sqlx::query_as::<_, RoomRow>(
            r"
            SELECT id, name, capacity, hotel_id, created_at, updated_at
            FROM rooms
            WHERE id = $1
            ",
        )
        .bind(room_id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("find_room"))?
        else {
            return Ok(None);
        };

        let bookings = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE room_id = $1 ORDER BY id"
        ))
        .bind(room_id.get())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("find_room_bookings"))?;

        Ok(Some(RoomWithBookings {
            room: Room::from(room),
            bookings: bookings.into_iter().map(Booking::from).collect(),
        }))
    }

    async fn find_bookings_by_user_id(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Vec<BookingWithRoom>> {
        let rows = sqlx::query_as::<_, BookingWithRoomRow>(
            r"
            SELECT b.id AS booking_id,
                   r.id AS room_id, r.name AS room_name, r.capacity AS room_capacity,
                   r.hotel_id AS room_hotel_id, r.created_at AS room_created_at,
                   r.updated_at AS room_updated_at
            FROM bookings b
            JOIN rooms r ON r.id = b.room_id
            WHERE b.user_id = $1
            ORDER BY b.id
            ",
        )
        .bind(user_id.get())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("find_user_bookings"))?;

        Ok(rows.into_iter().map(BookingWithRoom::from).collect())
    }

    async fn create_booking(&self, room_id: RoomId, user_id: UserId) -> RepositoryResult<Booking> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "INSERT INTO bookings (room_id, user_id) VALUES ($1, $2) RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(room_id.get())
        .bind(user_id.get())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("create_booking"))?;

        metrics::counter!("bookings_created_total").increment(1);
        Ok(Booking::from(row))
    }

    async fn update_booking_room(
        &self,
        booking_id: BookingId,
        room_id: RoomId,
    ) -> RepositoryResult<Booking> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            r"
            UPDATE bookings
            SET room_id = $2, updated_at = now()
            WHERE id = $1
            RETURNING {BOOKING_COLUMNS}
            "
        ))
        .bind(booking_id.get())
        .bind(room_id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("update_booking_room"))?
        .ok_or_else(|| RepositoryError::RowNotFound(format!("booking {booking_id}")))?;

        Ok(Booking::from(row))
    }
}
