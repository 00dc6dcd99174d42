use std::str::FromStr;
use std::time::Duration;

use moonlease_core::health::DEFAULT_CRITICAL_ALTITUDE;
use moonlease_monitor::settings::DEFAULT_STALENESS;
use moonlease_monitor::MonitorSettings;
use moonlease_telemetry::client::DEFAULT_FETCH_TIMEOUT;

/// Interval between scheduled refreshes.
const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 15;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has invalid value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `8000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&lookup, "PORT", 8000u16)?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30u64)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
        })
    }
}

/// Monitor configuration: where readings live and come from, and the
/// health / refresh tunables.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub database_url: String,
    pub satellite_realtime_url: String,
    pub critical_altitude: f64,
    pub refresh_interval: Duration,
    pub staleness: Duration,
    pub fetch_timeout: Duration,
}

impl MonitorConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                  | Default    |
    /// |--------------------------|------------|
    /// | `DATABASE_URL`           | (required) |
    /// | `SATELLITE_REALTIME_URL` | (required) |
    /// | `CRITICAL_ALTITUDE`      | `160`      |
    /// | `REFRESH_INTERVAL_SECS`  | `15`       |
    /// | `STALENESS_SECS`         | `20`       |
    /// | `FETCH_TIMEOUT_SECS`     | `10`       |
    ///
    /// When `TEST=true`, `TEST_DATABASE_URL` and `TEST_SATELLITE_REALTIME_URL`
    /// take precedence over their regular counterparts.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let test_mode = lookup("TEST").is_some_and(|v| v.eq_ignore_ascii_case("true"));
        let pick = |key: &'static str, test_key: &str| {
            let test_value = if test_mode { non_empty(lookup(test_key)) } else { None };
            test_value
                .or_else(|| non_empty(lookup(key)))
                .ok_or(ConfigError::Missing(key))
        };

        let database_url = pick("DATABASE_URL", "TEST_DATABASE_URL")?;
        let satellite_realtime_url =
            pick("SATELLITE_REALTIME_URL", "TEST_SATELLITE_REALTIME_URL")?;

        let critical_altitude =
            parse_or(&lookup, "CRITICAL_ALTITUDE", DEFAULT_CRITICAL_ALTITUDE)?;
        let refresh_interval_secs =
            parse_or(&lookup, "REFRESH_INTERVAL_SECS", DEFAULT_REFRESH_INTERVAL_SECS)?;
        let staleness_secs = parse_or(&lookup, "STALENESS_SECS", DEFAULT_STALENESS.as_secs())?;
        let fetch_timeout_secs =
            parse_or(&lookup, "FETCH_TIMEOUT_SECS", DEFAULT_FETCH_TIMEOUT.as_secs())?;

        if refresh_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "REFRESH_INTERVAL_SECS",
                value: "0".into(),
                reason: "must be positive".into(),
            });
        }
        if !critical_altitude.is_finite() {
            return Err(ConfigError::Invalid {
                key: "CRITICAL_ALTITUDE",
                value: critical_altitude.to_string(),
                reason: "must be finite".into(),
            });
        }

        Ok(Self {
            database_url,
            satellite_realtime_url,
            critical_altitude,
            refresh_interval: Duration::from_secs(refresh_interval_secs),
            staleness: Duration::from_secs(staleness_secs),
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
        })
    }

    /// Monitor tunables derived from this configuration.
    pub fn monitor_settings(&self) -> MonitorSettings {
        MonitorSettings {
            critical_altitude: self.critical_altitude,
            staleness: self.staleness,
            ..MonitorSettings::default()
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match non_empty(lookup(key)) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}
