//! Domain types for hotel bookings.
//!
//! Identifiers are newtypes over the `i32` serial keys used by the database.
//! Entities mirror the rows the booking rules read: a user's enrollment, the
//! ticket attached to that enrollment, rooms with their current occupants, and
//! the bookings themselves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wrap a raw database key.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the raw database key.
            #[must_use]
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Identifier of a registered user.
    UserId
);
define_id!(
    /// Identifier of an event enrollment.
    EnrollmentId
);
define_id!(
    /// Identifier of a ticket.
    TicketId
);
define_id!(
    /// Identifier of a ticket type.
    TicketTypeId
);
define_id!(
    /// Identifier of a hotel.
    HotelId
);
define_id!(
    /// Identifier of a hotel room.
    RoomId
);
define_id!(
    /// Identifier of a booking.
    BookingId
);

impl RoomId {
    /// Accept a client-supplied room id only if it is a positive key.
    #[must_use]
    pub fn from_raw(raw: i64) -> Option<Self> {
        positive_key(raw).map(Self)
    }
}

impl BookingId {
    /// Accept a client-supplied booking id only if it is a positive key.
    #[must_use]
    pub fn from_raw(raw: i64) -> Option<Self> {
        positive_key(raw).map(Self)
    }
}

fn positive_key(raw: i64) -> Option<i32> {
    i32::try_from(raw).ok().filter(|id| *id >= 1)
}

// ============================================================================
// Enrollment & tickets
// ============================================================================

/// A user's registration for the event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    /// Enrollment ID
    pub id: EnrollmentId,
    /// Owner of the enrollment
    pub user_id: UserId,
}

/// Payment state of a ticket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    /// Ticket is held but not paid yet
    Reserved,
    /// Ticket has been paid
    Paid,
}

impl TicketStatus {
    /// Database representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reserved => "RESERVED",
            Self::Paid => "PAID",
        }
    }

    /// Parse the database representation.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "RESERVED" => Some(Self::Reserved),
            "PAID" => Some(Self::Paid),
            _ => None,
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of ticket sold for the event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketType {
    /// Ticket type ID
    pub id: TicketTypeId,
    /// Display name
    pub name: String,
    /// Price in whole currency units
    pub price: i32,
    /// Online-only attendance
    pub is_remote: bool,
    /// Hotel accommodation is part of the ticket
    pub includes_hotel: bool,
}

/// A ticket together with its type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Ticket ID
    pub id: TicketId,
    /// Enrollment the ticket was issued for
    pub enrollment_id: EnrollmentId,
    /// Payment state
    pub status: TicketStatus,
    /// Type of the ticket
    pub ticket_type: TicketType,
}

// ============================================================================
// Rooms & bookings
// ============================================================================

/// RFC 3339 timestamps with millisecond precision, `2025-01-01T00:00:00.000Z`.
mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|value| value.with_timezone(&Utc))
            .map_err(D::Error::custom)
    }
}

/// A hotel room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Room ID
    pub id: RoomId,
    /// Display name
    pub name: String,
    /// Maximum number of bookings
    pub capacity: i32,
    /// Hotel the room belongs to
    pub hotel_id: HotelId,
    /// Creation timestamp
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// A room and every booking currently holding it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomWithBookings {
    /// The room
    pub room: Room,
    /// Bookings that occupy the room
    pub bookings: Vec<Booking>,
}

impl RoomWithBookings {
    /// Number of bookings holding the room.
    #[must_use]
    pub fn occupancy(&self) -> usize {
        self.bookings.len()
    }

    /// Whether another booking would exceed the room capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        let capacity = usize::try_from(self.room.capacity).unwrap_or(0);
        self.occupancy() >= capacity
    }
}

/// A user's booking of a room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Booking ID
    pub id: BookingId,
    /// User holding the booking
    pub user_id: UserId,
    /// Booked room
    pub room_id: RoomId,
    /// Creation timestamp
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// Read model returned when a user views their booking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingWithRoom {
    /// Booking ID
    pub id: BookingId,
    /// The booked room
    #[serde(rename = "Room")]
    pub room: Room,
}

// ============================================================================
// Sessions
// ============================================================================

/// An authenticated session, keyed by its bearer token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    /// Authenticated user
    pub user_id: UserId,
    /// Bearer token of the session
    pub token: String,
}
