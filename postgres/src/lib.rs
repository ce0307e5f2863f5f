//! PostgreSQL storage for hotel bookings.
//!
//! [`PostgresStore`] implements every repository trait from `booking-core`
//! over one connection pool.
//!
//! # Example
//!
//! ```no_run
//! use booking_postgres::{PoolSettings, PostgresStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = PostgresStore::connect("postgres://localhost/booking", &PoolSettings::default()).await?;
//! store.migrate().await?;
//! # Ok(())
//! # }
//! ```

use booking_core::repository::{RepositoryResult, StoreHealth};
use booking_core::RepositoryError;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use thiserror::Error;

mod bookings;
mod enrollments;
mod rows;
mod sessions;
mod tickets;

/// Errors raised while setting up the store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The pool could not reach the database.
    #[error("Failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    /// Embedded migrations failed.
    #[error("Migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Connection pool tuning.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    /// Upper bound on open connections
    pub max_connections: u32,
    /// Connections kept open when idle
    pub min_connections: u32,
    /// How long to wait for a connection
    pub connect_timeout: Duration,
    /// Idle time before a connection is closed
    pub idle_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(600),
        }
    }
}

/// PostgreSQL-backed booking store.
#[derive(Clone, Debug)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Open a pool against `database_url`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connect`] if no connection can be established.
    pub async fn connect(database_url: &str, settings: &PoolSettings) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .acquire_timeout(settings.connect_timeout)
            .idle_timeout(settings.idle_timeout)
            .connect(database_url)
            .await
            .map_err(StoreError::Connect)?;

        tracing::info!(
            max_connections = settings.max_connections,
            "Database pool ready"
        );
        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run the embedded schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Migrate`] if a migration fails to apply.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Database migrations applied");
        Ok(())
    }
}

impl StoreHealth for PostgresStore {
    async fn ping(&self) -> RepositoryResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(db_error("ping"))?;
        Ok(())
    }
}

/// Map a driver error, counting it by query.
fn db_error(query: &'static str) -> impl FnOnce(sqlx::Error) -> RepositoryError {
    move |err| {
        metrics::counter!("booking_store_errors_total", "query" => query).increment(1);
        tracing::warn!(query, error = %err, "Database query failed");
        RepositoryError::Database(format!("{query}: {err}"))
    }
}
