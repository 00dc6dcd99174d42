use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moonlease_api::background;
use moonlease_api::config::{MonitorConfig, ServerConfig};
use moonlease_api::router::build_app_router;
use moonlease_api::state::AppState;
use moonlease_db::store::PgReadingStore;
use moonlease_monitor::SatelliteMonitor;
use moonlease_telemetry::client::SatelliteClient;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "moonlease_api=debug,moonlease_monitor=debug,tower_http=debug".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().expect("Invalid server configuration");
    let monitor_config = MonitorConfig::from_env().expect("Invalid monitor configuration");
    tracing::info!(
        host = %config.host,
        port = %config.port,
        critical_altitude = monitor_config.critical_altitude,
        refresh_interval_secs = monitor_config.refresh_interval.as_secs(),
        "Loaded configuration"
    );

    // --- Database ---
    let pool = moonlease_db::create_pool(&monitor_config.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    moonlease_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    moonlease_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Monitor ---
    let store = Arc::new(PgReadingStore::new(pool));
    let source = Arc::new(
        SatelliteClient::new(
            monitor_config.satellite_realtime_url.clone(),
            monitor_config.fetch_timeout,
        )
        .expect("Failed to build telemetry client"),
    );
    let monitor = Arc::new(SatelliteMonitor::new(
        store,
        source,
        monitor_config.monitor_settings(),
    ));
    tracing::info!(url = %monitor_config.satellite_realtime_url, "Satellite monitor ready");

    // --- Scheduled refresh ---
    let refresh_cancel = CancellationToken::new();
    let refresh_handle = tokio::spawn(background::refresh::run(
        Arc::clone(&monitor),
        monitor_config.refresh_interval,
        refresh_cancel.clone(),
    ));

    // --- App state ---
    let state = AppState {
        monitor,
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    refresh_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), refresh_handle).await;
    tracing::info!("Refresh job stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
