//! Satellite altitude monitoring service.
//!
//! [`SatelliteMonitor`] ties the reading store to the telemetry source:
//! it refreshes on demand or on a schedule, serves trailing-window
//! statistics and classifies altitude health.

pub mod last_refresh;
pub mod service;
pub mod settings;

pub use last_refresh::LastRefresh;
pub use service::{RefreshError, SatelliteMonitor};
pub use settings::MonitorSettings;
