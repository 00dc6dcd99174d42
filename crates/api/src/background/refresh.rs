//! Scheduled telemetry refresh.
//!
//! Pulls one reading from the satellite on a fixed interval so stored history
//! keeps growing even when nobody is calling the API. Each tick spawns its
//! own refresh, so a slow upstream never delays the next tick.

use std::sync::Arc;
use std::time::Duration;

use moonlease_monitor::SatelliteMonitor;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Run the refresh loop until `cancel` is triggered.
///
/// The first tick fires immediately. Failures are logged and the loop keeps
/// going.
pub async fn run(monitor: Arc<SatelliteMonitor>, period: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = period.as_secs_f64(), "Refresh job started");

    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Refresh job stopping");
                break;
            }
            _ = interval.tick() => {
                let monitor = Arc::clone(&monitor);
                tokio::spawn(async move {
                    match monitor.refresh().await {
                        Ok(reading) => tracing::debug!(
                            id = reading.id,
                            altitude = reading.altitude,
                            "Scheduled refresh stored reading"
                        ),
                        Err(e) => tracing::warn!(error = %e, "Scheduled refresh failed"),
                    }
                });
            }
        }
    }
}
