//! # Booking Core
//!
//! Hotel booking rules for event ticket holders.
//!
//! A user may book a hotel room when they are enrolled in the event and hold
//! a paid, in-person ticket whose type includes accommodation. The room must
//! exist and have a free place. A booked user may view their booking and move
//! it to another room under the same rules.
//!
//! ## Layout
//!
//! - [`types`]: identifiers and entities
//! - [`error`]: `Forbidden` / `NotFound` classification
//! - [`repository`]: persistence interfaces
//! - [`environment`]: injected collaborators and the clock
//! - [`eligibility`]: pure checks
//! - [`service`]: the operations
//!
//! ## Example
//!
//! ```ignore
//! use booking_core::{BookingEnvironment, BookingService, UserId};
//!
//! let service = BookingService::new(BookingEnvironment::from_store(store));
//! let booking = service.book_room(UserId::new(1), Some(12)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod eligibility;
pub mod environment;
pub mod error;
pub mod repository;
pub mod service;
pub mod types;

pub use environment::{BookingEnvironment, Clock};
pub use error::{BookingError, ForbiddenReason, NotFoundKind, RepositoryError, Result};
pub use repository::{
    BookingRepository, EnrollmentRepository, RepositoryResult, SessionRepository, StoreHealth,
    TicketRepository,
};
pub use service::BookingService;
pub use types::*;
