//! Prometheus metrics for the booking server.
//!
//! # Exported Metrics
//!
//! - `booking_requests_total{operation, outcome}`: booking operations by
//!   result (`ok`, `forbidden`, `not_found`, `error`)
//! - `bookings_created_total`: rows inserted into `bookings`
//! - `booking_store_errors_total{query}`: failed database queries
//!
//! The recorder is installed once at startup. `/metrics` is served on its
//! own listener.

use axum::{Router, routing::get};
use metrics::describe_counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::future::Future;
use std::net::SocketAddr;
use thiserror::Error;

/// Errors from metrics operations.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to install metrics exporter
    #[error("Failed to install metrics exporter: {0}")]
    Install(String),
    /// Failed to bind or serve the metrics listener
    #[error("Metrics server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Register descriptions for every booking metric.
pub fn register_business_metrics() {
    describe_counter!(
        booking_core::service::REQUESTS_TOTAL,
        "Total booking operations by operation and outcome"
    );
    describe_counter!("bookings_created_total", "Total bookings created");
    describe_counter!(
        "booking_store_errors_total",
        "Total failed database queries by query"
    );
}

/// Prometheus metrics server.
pub struct MetricsServer {
    addr: SocketAddr,
    handle: PrometheusHandle,
}

impl std::fmt::Debug for MetricsServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsServer")
            .field("addr", &self.addr)
            .finish_non_exhaustive()
    }
}

impl MetricsServer {
    /// Install the global Prometheus recorder.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::Install`] if a recorder is already installed.
    pub fn install(addr: SocketAddr) -> Result<Self, MetricsError> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| MetricsError::Install(e.to_string()))?;

        register_business_metrics();
        Ok(Self { addr, handle })
    }

    /// Render current metrics in Prometheus text format.
    #[must_use]
    pub fn render(&self) -> String {
        self.handle.render()
    }

    /// Router exposing `GET /metrics`.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    }

    /// Serve `/metrics` until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::Io`] if the listener cannot bind or fails.
    pub async fn serve(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), MetricsError> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!(
            addr = %self.addr,
            "Metrics server started - available at http://{}/metrics",
            self.addr
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}
