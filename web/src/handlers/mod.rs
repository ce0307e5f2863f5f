//! Shared HTTP handlers.

pub mod health;

pub use health::{HealthBody, health_check, readiness};
