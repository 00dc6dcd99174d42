//! On-disk state: the latest reading plus an append-only log.

use std::io::ErrorKind;
use std::path::PathBuf;

use moonlease_core::types::utc_now;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error::SatelliteError;
use crate::generator::{generate, GeneratedReading, ReadingRequest, StoredReading};

/// Holds only the most recent reading.
pub const STATE_FILE: &str = "last_reading.txt";

/// One line per generated reading.
pub const LOG_FILE: &str = "readings.log";

/// State directory with serialised access.
///
/// Every generation is read-modify-write on [`STATE_FILE`], so the whole
/// cycle runs under one async mutex.
#[derive(Debug)]
pub struct StateDir {
    dir: PathBuf,
    lock: Mutex<()>,
}

impl StateDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn state_path(&self) -> PathBuf {
        self.dir.join(STATE_FILE)
    }

    pub fn log_path(&self) -> PathBuf {
        self.dir.join(LOG_FILE)
    }

    /// Generate the next reading from the stored one, persist it and log it.
    pub async fn next_reading(
        &self,
        request: ReadingRequest,
    ) -> Result<GeneratedReading, SatelliteError> {
        let _guard = self.lock.lock().await;

        let previous = self.load_last().await?;
        let reading = {
            let mut rng = rand::rng();
            generate(previous.as_ref(), &request, utc_now(), &mut rng)
        };

        tokio::fs::write(self.state_path(), reading.state_line()).await?;

        let mut log = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.log_path())
            .await?;
        log.write_all(reading.log_line().as_bytes()).await?;
        log.flush().await?;

        tracing::debug!(
            last_updated = %reading.last_updated,
            altitude = reading.altitude,
            source = %reading.source,
            "Generated reading"
        );
        Ok(reading)
    }

    /// The stored reading, if any. A corrupt state file counts as none.
    async fn load_last(&self) -> Result<Option<StoredReading>, SatelliteError> {
        let path = self.state_path();
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => {
                let parsed = StoredReading::parse(&contents);
                if parsed.is_none() {
                    tracing::warn!(path = %path.display(), "Ignoring unreadable state file");
                }
                Ok(parsed)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
