use std::path::PathBuf;

/// Errors raised while reading the fake satellite configuration.
#[derive(Debug, thiserror::Error)]
#[error("{key} has invalid value '{value}'")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

/// Fake satellite configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct SatelliteConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the state file and readings log.
    pub state_dir: PathBuf,
}

impl SatelliteConfig {
    /// | Env Var               | Default   |
    /// |-----------------------|-----------|
    /// | `HOST`                | `0.0.0.0` |
    /// | `PORT`                | `8001`    |
    /// | `SATELLITE_STATE_DIR` | `.`       |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = match lookup("PORT") {
            None => 8001,
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError {
                key: "PORT",
                value: raw.clone(),
            })?,
        };
        let state_dir = lookup("SATELLITE_STATE_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            host,
            port,
            state_dir,
        })
    }
}
