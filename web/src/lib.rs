//! Axum integration for the hotel booking service.
//!
//! This crate is the HTTP edge of the "Functional Core, Imperative Shell"
//! split: the booking rules in `booking-core` never see a request, and
//! handlers never decide eligibility.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Imperative Shell (Axum)         │  ← bearer auth, JSON
//! │  - Request parsing                      │  ← correlation IDs, tracing
//! │  - Status mapping                       │  ← AppError
//! ├─────────────────────────────────────────┤
//! │         Functional Core                 │
//! │  - Eligibility checks                   │
//! │  - Booking service                      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Request Flow
//!
//! 1. [`middleware::correlation_id_layer`] tags the request
//! 2. [`extractors::BearerToken`] pulls the session token
//! 3. The handler calls the booking service
//! 4. `BookingError` converts into [`AppError`] with `?`

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;

pub use error::AppError;
pub use extractors::{BearerToken, CorrelationId, LenientJson};
pub use middleware::{CORRELATION_ID_HEADER, correlation_id_layer};

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
