//! The monitor service: refresh, staleness-gated reads, stats and health.

use std::sync::Arc;

use moonlease_core::altitude::AltitudeStats;
use moonlease_core::health::{assess_window, HealthStatus};
use moonlease_core::types::{utc_now, Timestamp};
use moonlease_db::models::reading::{NewReading, Reading};
use moonlease_db::store::{ReadingStore, StoreError};
use moonlease_telemetry::{TelemetryError, TelemetrySource};

use crate::last_refresh::LastRefresh;
use crate::settings::MonitorSettings;

/// Why a refresh produced no new reading.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    /// The upstream request failed or returned something unusable.
    #[error("Telemetry fetch failed: {0}")]
    Fetch(#[from] TelemetryError),

    /// The upstream answered with an empty payload.
    #[error("Telemetry endpoint returned no data")]
    EmptyPayload,

    /// The reading was fetched but could not be stored.
    #[error("Failed to store reading: {0}")]
    Storage(#[from] StoreError),
}

/// Altitude monitor over an injected store and telemetry source.
///
/// Construct once at startup and share behind an `Arc`. All methods take
/// `&self` and may run concurrently; overlapping refreshes are safe because
/// the store deduplicates on timestamp.
pub struct SatelliteMonitor {
    store: Arc<dyn ReadingStore>,
    source: Arc<dyn TelemetrySource>,
    settings: MonitorSettings,
    last_refresh: LastRefresh,
}

impl SatelliteMonitor {
    pub fn new(
        store: Arc<dyn ReadingStore>,
        source: Arc<dyn TelemetrySource>,
        settings: MonitorSettings,
    ) -> Self {
        Self {
            store,
            source,
            settings,
            last_refresh: LastRefresh::new(),
        }
    }

    /// When the last successful refresh finished, if any.
    pub fn last_refresh(&self) -> Option<Timestamp> {
        self.last_refresh.get()
    }

    /// Forget the last refresh so the next read fetches upstream.
    pub fn reset_last_refresh(&self) {
        self.last_refresh.clear();
    }

    /// Fetch one reading upstream, store it and mark the refresh time.
    pub async fn refresh(&self) -> Result<Reading, RefreshError> {
        let fetched = self
            .source
            .fetch_reading()
            .await?
            .ok_or(RefreshError::EmptyPayload)?;

        let reading = self
            .store
            .insert(NewReading::new(fetched.timestamp, fetched.altitude))
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Refresh could not store reading"))?;

        self.last_refresh.set(utc_now());
        tracing::debug!(
            id = reading.id,
            timestamp = %reading.timestamp,
            altitude = reading.altitude,
            "Refreshed satellite reading"
        );
        Ok(reading)
    }

    /// Readings from the trailing window, refreshing first when stale.
    ///
    /// Never fails: a failed refresh is logged and stored data is served,
    /// and a failed read is logged and treated as an empty window.
    pub async fn gated_window(&self, window_minutes: i64) -> Vec<Reading> {
        if self
            .last_refresh
            .is_stale(utc_now(), self.settings.staleness)
        {
            if let Err(e) = self.refresh().await {
                tracing::warn!(error = %e, "On-demand refresh failed, serving stored readings");
            }
        }

        match self.store.latest(window_minutes).await {
            Ok(readings) => readings,
            Err(e) => {
                tracing::error!(error = %e, window_minutes, "Failed to read reading window");
                Vec::new()
            }
        }
    }

    /// Min / max / average altitude over the stats window.
    ///
    /// An empty window is bootstrapped from a single fresh reading. Only if
    /// that refresh also fails is the aggregate empty. `count` is the number
    /// of stored readings in the window, so it stays 0 after a bootstrap.
    pub async fn stats(&self) -> AltitudeStats {
        let window = self.gated_window(self.settings.stats_window_minutes).await;

        let altitudes = if window.is_empty() {
            match self.refresh().await {
                Ok(reading) => vec![reading.altitude],
                Err(e) => {
                    tracing::warn!(error = %e, "Stats window empty and bootstrap refresh failed");
                    Vec::new()
                }
            }
        } else {
            window.iter().map(|r| r.altitude).collect()
        };

        AltitudeStats::from_altitudes(altitudes).with_count(window.len())
    }

    /// Classify current altitude health.
    pub async fn health(&self) -> HealthStatus {
        let critical = self.settings.critical_altitude;
        let window = self.gated_window(self.settings.health_window_minutes).await;
        let altitudes: Vec<f64> = window.iter().map(|r| r.altitude).collect();

        let verdict = assess_window(&altitudes, critical);
        let recent_dip = verdict.needs_lookback() && self.dipped_recently(critical).await;
        let status = verdict.resolve(recent_dip);

        tracing::debug!(
            status = status.as_str(),
            readings = altitudes.len(),
            recent_dip,
            "Classified altitude health"
        );
        status
    }

    async fn dipped_recently(&self, critical: f64) -> bool {
        match self
            .store
            .last_below(critical, self.settings.warning_lookback_minutes)
            .await
        {
            Ok(dip) => {
                if let Some(r) = &dip {
                    tracing::debug!(
                        timestamp = %r.timestamp,
                        altitude = r.altitude,
                        "Recent critical dip found"
                    );
                }
                dip.is_some()
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to look back for critical dips");
                false
            }
        }
    }
}
