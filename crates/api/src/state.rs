use std::sync::Arc;

use moonlease_monitor::SatelliteMonitor;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Altitude monitor (store, telemetry source, last-refresh state).
    pub monitor: Arc<SatelliteMonitor>,
    pub config: Arc<ServerConfig>,
}
