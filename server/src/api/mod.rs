//! HTTP API handlers.

pub mod bookings;
