//! Hotel booking HTTP server.

use booking_postgres::PostgresStore;
use booking_server::metrics::MetricsServer;
use booking_server::{AppState, Config, build_router};
use std::future::IntoFuture;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Missing .env is fine; real deployments use the environment
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,booking_server=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting hotel booking server");

    let config = Config::from_env();
    let addr = config.server.addr()?;
    let metrics_addr = config.server.metrics_addr()?;
    info!(%addr, %metrics_addr, run_migrations = config.run_migrations, "Configuration loaded");

    let metrics = MetricsServer::install(metrics_addr)?;

    info!("Connecting to database...");
    let store = PostgresStore::connect(&config.database.url, &config.database.pool_settings()).await?;
    if config.run_migrations {
        store.migrate().await?;
    }

    let app = build_router(AppState::new(store));

    let (stop_tx, stop_rx) = watch::channel(false);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Server listening");
    let mut server = tokio::spawn(
        axum::serve(listener, app)
            .with_graceful_shutdown(stopped(stop_rx.clone()))
            .into_future(),
    );
    let metrics_task = tokio::spawn(metrics.serve(stopped(stop_rx)));

    tokio::select! {
        () = shutdown_signal() => {}
        result = &mut server => {
            // Server exited before any signal
            let _ = stop_tx.send(true);
            result??;
            return Ok(());
        }
    }

    let _ = stop_tx.send(true);

    match tokio::time::timeout(config.server.shutdown_timeout(), server).await {
        Ok(Ok(Ok(()))) => info!("Server stopped"),
        Ok(Ok(Err(e))) => error!(error = %e, "Server error during shutdown"),
        Ok(Err(e)) => error!(error = %e, "Server task failed"),
        Err(_) => warn!(
            timeout_secs = config.server.shutdown_timeout,
            "Shutdown timed out, dropping in-flight requests"
        ),
    }

    match metrics_task.await {
        Ok(Err(e)) => warn!(error = %e, "Metrics server error"),
        Err(e) => warn!(error = %e, "Metrics server task failed"),
        Ok(Ok(())) => {}
    }

    Ok(())
}

/// Resolves once `true` is sent on the stop channel.
async fn stopped(mut rx: watch::Receiver<bool>) {
    let _ = rx.wait_for(|stop| *stop).await;
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
