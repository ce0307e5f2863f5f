//! # Booking Server
//!
//! HTTP server for hotel room bookings.
//!
//! ## Endpoints
//!
//! | Route | Auth | Success |
//! |-------|------|---------|
//! | `GET /health` | – | 200 |
//! | `GET /ready` | – | 200, 503 when the database is down |
//! | `GET /booking` | bearer | 200 `[{"id", "Room"}]` |
//! | `POST /booking` | bearer | 201 `{"bookingId"}` |
//! | `PUT /booking/:bookingId` | bearer | 200 booking |
//!
//! The router is generic over a [`state::BookingStore`], so the same
//! handlers run against `PostgresStore` in production and `InMemoryStore`
//! in tests.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod auth;
pub mod config;
pub mod health;
pub mod metrics;
pub mod routes;
pub mod state;

pub use config::Config;
pub use routes::build_router;
pub use state::{AppState, BookingStore};
