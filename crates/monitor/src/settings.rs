use std::time::Duration;

use moonlease_core::health::{
    DEFAULT_CRITICAL_ALTITUDE, HEALTH_WINDOW_MINUTES, WARNING_LOOKBACK_MINUTES,
};

/// Maximum age of the last refresh before a read triggers a new one.
pub const DEFAULT_STALENESS: Duration = Duration::from_secs(20);

/// Trailing window (minutes) for `/stats`.
pub const STATS_WINDOW_MINUTES: i64 = 5;

/// Tunables for [`SatelliteMonitor`](crate::SatelliteMonitor).
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorSettings {
    /// Altitudes strictly below this are critical.
    pub critical_altitude: f64,
    /// Reads refresh first when the last refresh is older than this.
    pub staleness: Duration,
    pub stats_window_minutes: i64,
    pub health_window_minutes: i64,
    /// How far back a past critical dip still yields a warning.
    pub warning_lookback_minutes: i64,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            critical_altitude: DEFAULT_CRITICAL_ALTITUDE,
            staleness: DEFAULT_STALENESS,
            stats_window_minutes: STATS_WINDOW_MINUTES,
            health_window_minutes: HEALTH_WINDOW_MINUTES,
            warning_lookback_minutes: WARNING_LOOKBACK_MINUTES,
        }
    }
}
