//! Altitude health classification.
//!
//! Two-stage rule. The short trailing window decides `Missing` and
//! `Critical` on its own. Only when that window is nominal does the longer
//! lookback matter: a dip below the critical altitude inside the lookback
//! downgrades `Ok` to `Warning`.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::altitude::window_minimum;

/// Altitude below which the satellite is considered in orbital decay.
pub const DEFAULT_CRITICAL_ALTITUDE: f64 = 160.0;

/// Trailing window (minutes) inspected for the current health state.
pub const HEALTH_WINDOW_MINUTES: i64 = 1;

/// Lookback (minutes) searched for a recent critical dip.
pub const WARNING_LOOKBACK_MINUTES: i64 = 2;

pub const MSG_MISSING: &str = "WARNING: No altitude information available";
pub const MSG_CRITICAL: &str = "WARNING: RAPID ORBITAL DECAY IMMINENT";
pub const MSG_WARNING: &str = "Sustained Low Earth Orbit Resumed";
pub const MSG_OK: &str = "Altitude is A-OK";

/// The four reportable health states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    /// No readings in the trailing window.
    Missing,
    /// The trailing window's minimum is below the critical altitude.
    Critical,
    /// Currently nominal, but dipped below the critical altitude recently.
    Warning,
    Ok,
}

impl HealthStatus {
    /// Fixed user-facing message.
    pub fn message(self) -> &'static str {
        match self {
            Self::Missing => MSG_MISSING,
            Self::Critical => MSG_CRITICAL,
            Self::Warning => MSG_WARNING,
            Self::Ok => MSG_OK,
        }
    }

    /// Short machine-friendly name, used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Ok => "ok",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for HealthStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// Verdict on the trailing window alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowHealth {
    Empty,
    Breached,
    Nominal,
}

impl WindowHealth {
    /// Whether the lookback query is needed to finish classification.
    pub fn needs_lookback(self) -> bool {
        matches!(self, Self::Nominal)
    }

    /// Final status given whether a dip was found in the lookback.
    ///
    /// `recent_dip` is ignored unless the window is nominal.
    pub fn resolve(self, recent_dip: bool) -> HealthStatus {
        match self {
            Self::Empty => HealthStatus::Missing,
            Self::Breached => HealthStatus::Critical,
            Self::Nominal if recent_dip => HealthStatus::Warning,
            Self::Nominal => HealthStatus::Ok,
        }
    }
}

/// Assess the trailing window. A minimum strictly below `critical` breaches.
pub fn assess_window(altitudes: &[f64], critical: f64) -> WindowHealth {
    match window_minimum(altitudes) {
        None => WindowHealth::Empty,
        Some(min) if min < critical => WindowHealth::Breached,
        Some(_) => WindowHealth::Nominal,
    }
}
