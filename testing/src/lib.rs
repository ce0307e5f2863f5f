//! # Booking Testing
//!
//! Testing utilities for the hotel booking service.
//!
//! This crate provides:
//! - [`InMemoryStore`]: every repository trait over shared in-memory tables
//! - [`fixtures`]: users, tickets and rooms at each stage of eligibility
//! - [`mocks::FixedClock`]: deterministic timestamps
//!
//! ## Example
//!
//! ```ignore
//! use booking_core::{BookingEnvironment, BookingService};
//! use booking_testing::{fixtures, InMemoryStore};
//!
//! #[tokio::test]
//! async fn test_book_room() {
//!     let store = InMemoryStore::new();
//!     let user = fixtures::eligible_user(&store);
//!     let (_, room) = fixtures::room_in_new_hotel(&store);
//!
//!     let service = BookingService::new(BookingEnvironment::from_store(store.clone()));
//!     let booking = service.book_room(user.id, Some(room.id.get().into())).await;
//!     assert!(booking.is_ok());
//! }
//! ```

pub mod fixtures;
pub mod store;

/// Mock implementations of environment traits.
pub mod mocks {
    use booking_core::environment::Clock;
    use chrono::{DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time.
    ///
    /// # Example
    ///
    /// ```
    /// use booking_testing::mocks::FixedClock;
    /// use booking_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone, Copy)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Clock fixed at 2025-01-01T00:00:00Z.
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::from_timestamp(1_735_689_600, 0).unwrap_or_default())
    }
}

/// Route `tracing` output through the test harness.
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init();
}

pub use mocks::{FixedClock, test_clock};
pub use store::InMemoryStore;
